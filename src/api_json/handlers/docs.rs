use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::ScheduleRequest;
use crate::models::CourseFilter;

pub async fn help_handler() -> impl Responder {
    let example = ScheduleRequest {
        sections: None,
        max_classes: Some(5),
        filter: Some(CourseFilter { subject: Some("C S".to_string()), ..Default::default() }),
        session_id: None,
        save_as: Some("final_schedule.json".to_string()),
    };

    HttpResponse::Ok().json(json!({
        "description": "Schedule Sooner API. Lists the course catalog and builds one conflict-free schedule (at most one section per course).",
        "endpoints": {
            "GET /cs/courses/": "paginated catalog; filters: subject, course, meeting_days, instructor, start_time, end_time (HH:MM 24h), page",
            "POST /api/schedule": "build a schedule, returns {schedule, groups}",
            "POST /api/user-input/{session_id}": "save free-text preferences: {\"query\": \"CS 2413 and CS 2334 on MWF\"}",
            "GET /api/user-input/{session_id}": "read the saved text",
            "GET /api/preferences/{session_id}": "preferences parsed from the saved text",
            "POST /api/upload-file/": "multipart upload, field 'file'",
            "GET /api/download-file/?filename=": "download an uploaded or saved file"
        },
        "schedule_example": example,
        "get_example_query": "/cs/courses/?meeting_days=MWF&start_time=09:00&instructor=sridhar"
    }))
}
