// Algoritmos de armado de horario: parseo de horas, conflictos y selección.
pub mod conflict;
pub mod filters;
pub mod section_selector;
pub mod time;

pub use conflict::{conflicts, sections_conflict};
pub use filters::{apply_filter, validate_filter};
pub use section_selector::{build_schedule, build_schedule_report, group_sections, DEFAULT_MAX_CLASSES};
pub use time::{parse_clock_time, parse_time_range};
