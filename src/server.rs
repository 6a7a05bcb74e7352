use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::api_json::handlers::*;
use crate::catalog::load_sections_or_empty;
use crate::config::{AppConfig, DEFAULT_MAX_SESSIONS};
use crate::models::CourseSection;

/// Texto libre guardado para una sesión.
#[derive(Debug, Clone, Serialize)]
pub struct SavedInput {
    pub user_input: String,
    pub saved_at: DateTime<Utc>,
}

/// Estado compartido por todos los workers.
///
/// User input is kept per session id; there is no process-wide slot that
/// one request could overwrite for another.
pub struct AppState {
    pub catalog: Vec<CourseSection>,
    pub upload_dir: PathBuf,
    pub max_classes: usize,
    max_sessions: usize,
    inputs: Mutex<SessionInputs>,
}

/// Inputs by session id. `seq` orders saves that share a timestamp.
#[derive(Default)]
struct SessionInputs {
    entries: HashMap<String, (u64, SavedInput)>,
    seq: u64,
}

impl SessionInputs {
    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, (seq, saved))| (saved.saved_at, *seq))
            .map(|(id, _)| id.clone());
        if let Some(id) = oldest {
            self.entries.remove(&id);
            debug!(session = %id, "evicted oldest saved input");
        }
    }
}

impl AppState {
    pub fn new(catalog: Vec<CourseSection>, upload_dir: PathBuf, max_classes: usize) -> Self {
        AppState {
            catalog,
            upload_dir,
            max_classes,
            max_sessions: DEFAULT_MAX_SESSIONS,
            inputs: Mutex::new(SessionInputs::default()),
        }
    }

    /// Caps how many sessions keep a saved input; at least one is kept.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    fn inputs(&self) -> MutexGuard<'_, SessionInputs> {
        // entries are replaced whole, a poisoned map is still consistent
        self.inputs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stores the text for `session_id`. A new session at the cap pushes
    /// out the one saved longest ago.
    pub fn save_input(&self, session_id: &str, user_input: String) {
        let mut inputs = self.inputs();
        if !inputs.entries.contains_key(session_id) && inputs.entries.len() >= self.max_sessions {
            inputs.evict_oldest();
        }
        inputs.seq += 1;
        let seq = inputs.seq;
        inputs.entries.insert(
            session_id.to_string(),
            (seq, SavedInput { user_input, saved_at: Utc::now() }),
        );
    }

    pub fn input_for(&self, session_id: &str) -> Option<SavedInput> {
        self.inputs().entries.get(session_id).map(|(_, saved)| saved.clone())
    }

    pub fn session_count(&self) -> usize {
        self.inputs().entries.len()
    }
}

/// Registers every route; shared by `run_server` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
        let body = json!({"error": err.to_string()});
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json_cfg)
        .route("/", web::get().to(welcome_handler))
        .route("/help", web::get().to(help_handler))
        .route("/cs/courses/", web::get().to(courses_list_handler))
        .route("/api/schedule", web::post().to(schedule_handler))
        .route("/api/user-input/{session_id}", web::post().to(save_user_input_handler))
        .route("/api/user-input/{session_id}", web::get().to(get_user_input_handler))
        .route("/api/preferences/{session_id}", web::get().to(preferences_handler))
        .route("/api/upload-file/", web::post().to(upload_file_handler))
        .route("/api/download-file/", web::get().to(download_file_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let catalog = load_sections_or_empty(&config.catalog_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    info!(
        sections = catalog.len(),
        catalog = %config.catalog_path.display(),
        "catalog loaded"
    );

    let state = web::Data::new(
        AppState::new(catalog, config.upload_dir.clone(), config.max_classes)
            .with_max_sessions(config.max_sessions),
    );

    info!("listening on http://{}", config.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
