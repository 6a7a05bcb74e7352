// Configuración de la aplicación leída del entorno (y de `.env` si existe).
use crate::algorithm::section_selector::DEFAULT_MAX_CLASSES;
use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const ENV_BIND: &str = "SCHEDULESOONER_BIND";
pub const ENV_CATALOG: &str = "SCHEDULESOONER_CATALOG";
pub const ENV_UPLOAD_DIR: &str = "SCHEDULESOONER_UPLOAD_DIR";
pub const ENV_MAX_CLASSES: &str = "SCHEDULESOONER_MAX_CLASSES";
pub const ENV_MAX_SESSIONS: &str = "SCHEDULESOONER_MAX_SESSIONS";

/// Sessions that keep a saved free-text input at the same time.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: String,
    pub catalog_path: PathBuf,
    pub upload_dir: PathBuf,
    pub max_classes: usize,
    pub max_sessions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: "127.0.0.1:8080".to_string(),
            catalog_path: PathBuf::from("data/all_unique_courses.json"),
            upload_dir: PathBuf::from("uploaded_files"),
            max_classes: DEFAULT_MAX_CLASSES,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl AppConfig {
    /// Reads the `SCHEDULESOONER_*` variables, loading `.env` first.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys keep the
    /// default, an unparseable number is logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = AppConfig::default();
        if let Some(bind) = get(ENV_BIND) {
            cfg.bind = bind;
        }
        if let Some(p) = get(ENV_CATALOG) {
            cfg.catalog_path = PathBuf::from(p);
        }
        if let Some(p) = get(ENV_UPLOAD_DIR) {
            cfg.upload_dir = PathBuf::from(p);
        }
        if let Some(raw) = get(ENV_MAX_CLASSES) {
            match raw.parse::<usize>() {
                Ok(n) => cfg.max_classes = n,
                Err(_) => warn!(value = %raw, "ignoring invalid {}", ENV_MAX_CLASSES),
            }
        }
        if let Some(raw) = get(ENV_MAX_SESSIONS) {
            match raw.parse::<usize>() {
                Ok(n) => cfg.max_sessions = n,
                Err(_) => warn!(value = %raw, "ignoring invalid {}", ENV_MAX_SESSIONS),
            }
        }
        cfg
    }
}
