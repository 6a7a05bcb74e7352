use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

use crate::error::ScheduleError;
use crate::models::{CourseFilter, CourseSection};

pub mod handlers;

/// Cuerpo de `POST /api/schedule`.
///
/// # JSON esperado
/// ```json
/// {
///   "sections": [ { "subject": "C S", "course": "2413", "section": "001",
///                   "meeting_days": "MWF", "meeting_time": "9:00 am - 9:50 am" } ],
///   "max_classes": 5,
///   "filter": { "instructor": "Sridhar" },
///   "session_id": null,
///   "save_as": "final_schedule.json"
/// }
/// ```
///
/// Every field is optional. The candidate sections come from, in order of
/// precedence: `sections`, the preferences stored for `session_id`, or the
/// whole catalog. `filter` narrows them down before the build.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub sections: Option<Vec<CourseSection>>,
    #[serde(default)]
    pub max_classes: Option<usize>,
    #[serde(default)]
    pub filter: Option<CourseFilter>,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Nombre de archivo en el directorio de subidas donde guardar el horario.
    #[serde(default)]
    pub save_as: Option<String>,
}

/// Cuerpo de `POST /api/user-input/{session_id}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserInputRequest {
    #[serde(default)]
    pub query: String,
}

pub fn parse_schedule_request(json_str: &str) -> Result<ScheduleRequest, serde_json::Error> {
    serde_json::from_str::<ScheduleRequest>(json_str)
}

/// Builds a [`CourseFilter`] out of query-string parameters; unknown keys
/// (like `page`) are ignored.
pub fn filter_from_query(qm: &HashMap<String, String>) -> CourseFilter {
    let get = |k: &str| qm.get(k).map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    CourseFilter {
        subject: get("subject"),
        course: get("course"),
        meeting_days: get("meeting_days"),
        instructor: get("instructor"),
        start_time: get("start_time"),
        end_time: get("end_time"),
    }
}

/// Respuesta JSON `{"error": ...}` con el status que corresponde al error.
pub fn error_response(err: &ScheduleError) -> HttpResponse {
    let body = json!({"error": err.to_string()});
    match err {
        ScheduleError::InvalidFilter { .. } | ScheduleError::InvalidFileName(_) => HttpResponse::BadRequest().json(body),
        ScheduleError::NotFound(_) => HttpResponse::NotFound().json(body),
        ScheduleError::Io { .. } | ScheduleError::Json { .. } => HttpResponse::InternalServerError().json(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_request() {
        let json_data = r#"
        {
            "sections": [
                {"crn": "1", "subject": "C S", "course": "2413", "section": "001",
                 "meeting_days": "MWF", "meeting_time": "9:00 am - 9:50 am"}
            ],
            "max_classes": 3,
            "filter": {"instructor": "Sridhar"},
            "save_as": "final_schedule.json"
        }
        "#;
        let req = parse_schedule_request(json_data).expect("Debe parsear la solicitud");
        assert_eq!(req.max_classes, Some(3));
        assert_eq!(req.sections.as_ref().map(|s| s.len()), Some(1));
        assert_eq!(req.filter.and_then(|f| f.instructor).as_deref(), Some("Sridhar"));
        assert!(req.session_id.is_none());
    }

    #[test]
    fn parse_empty_request() {
        let req = parse_schedule_request("{}").expect("Debe parsear JSON vacío");
        assert!(req.sections.is_none());
        assert!(req.max_classes.is_none());
    }

    #[test]
    fn query_filter_ignores_blank_and_unknown_keys() {
        let qm: HashMap<String, String> = HashMap::from([
            ("page".to_string(), "2".to_string()),
            ("meeting_days".to_string(), "MWF".to_string()),
            ("instructor".to_string(), "  ".to_string()),
        ]);
        let f = filter_from_query(&qm);
        assert_eq!(f.meeting_days.as_deref(), Some("MWF"));
        assert!(f.instructor.is_none());
        assert!(f.course.is_none());
    }
}
