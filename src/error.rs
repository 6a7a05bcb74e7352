//! Error types shared by the catalog I/O, filters and HTTP layer.
//!
//! The scheduling core (`algorithm::time`, `algorithm::conflict`,
//! `algorithm::section_selector`) never returns these: bad time or day data
//! is absorbed there as "cannot conflict".

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid filter value for `{field}`: {value}")]
    InvalidFilter { field: &'static str, value: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid file name: {0}")]
    InvalidFileName(String),
}

impl ScheduleError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScheduleError::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ScheduleError::Json { path: path.into(), source }
    }
}
