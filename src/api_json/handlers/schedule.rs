use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use tracing::info;

use crate::algorithm::filters::apply_filter;
use crate::algorithm::section_selector::build_schedule_report;
use crate::api_json::handlers::files::sanitize_file_name;
use crate::api_json::{error_response, ScheduleRequest};
use crate::catalog::save_schedule;
use crate::preferences::{candidates_for, parse_user_input};
use crate::server::AppState;

/// POST /api/schedule
/// Arma un horario sin conflictos y devuelve `{schedule, groups}`.
pub async fn schedule_handler(state: web::Data<AppState>, body: web::Json<ScheduleRequest>) -> impl Responder {
    let req = body.into_inner();
    let max_classes = req.max_classes.unwrap_or(state.max_classes);

    let candidates = match (req.sections, req.session_id) {
        (Some(sections), _) => sections,
        (None, Some(session_id)) => {
            let saved = match state.input_for(&session_id) {
                Some(s) => s,
                None => return HttpResponse::NotFound().json(json!({"error": format!("no user input saved for session '{}'", session_id)})),
            };
            let prefs = parse_user_input(&saved.user_input, &state.catalog);
            match candidates_for(&prefs, &state.catalog) {
                Ok(c) => c,
                Err(e) => return error_response(&e),
            }
        }
        (None, None) => state.catalog.clone(),
    };

    let candidates = match req.filter {
        Some(f) => match apply_filter(&candidates, &f) {
            Ok(c) => c,
            Err(e) => return error_response(&e),
        },
        None => candidates,
    };

    let report = build_schedule_report(&candidates, max_classes);
    info!(
        candidates = candidates.len(),
        selected = report.schedule.len(),
        skipped = report.skipped().count(),
        "schedule built"
    );

    if let Some(name) = req.save_as {
        let name = match sanitize_file_name(&name) {
            Ok(n) => n,
            Err(e) => return error_response(&e),
        };
        if let Err(e) = save_schedule(state.upload_dir.join(&name), &report.schedule) {
            return error_response(&e);
        }
    }

    HttpResponse::Ok().json(report)
}
