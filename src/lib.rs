// Biblioteca raíz del crate `schedulesooner`.
// Reexporta los módulos principales: el armado de horarios (`algorithm`), la
// E/S de catálogos (`catalog`), las preferencias en texto libre y el servidor.
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod preferences;
pub mod server;

pub use algorithm::{build_schedule, build_schedule_report, conflicts, parse_time_range};
pub use error::{Result, ScheduleError};
pub use models::{CourseSection, ScheduleReport, TimeWindow};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
