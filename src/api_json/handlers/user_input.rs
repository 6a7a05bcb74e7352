use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{error_response, UserInputRequest};
use crate::preferences::{candidates_for, parse_user_input};
use crate::server::AppState;

/// POST /api/user-input/{session_id}  body: {"query": "..."}
pub async fn save_user_input_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UserInputRequest>,
) -> impl Responder {
    let session_id = path.into_inner();
    if session_id.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "session id is required"}));
    }
    state.save_input(&session_id, body.into_inner().query);
    HttpResponse::Ok().json(json!({"message": "User input saved successfully."}))
}

/// GET /api/user-input/{session_id}
pub async fn get_user_input_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let saved = state.input_for(&path.into_inner());
    HttpResponse::Ok().json(json!({
        "user_input": saved.as_ref().map(|s| s.user_input.clone()),
        "saved_at": saved.map(|s| s.saved_at),
    }))
}

/// GET /api/preferences/{session_id}
/// Preferencias extraídas del texto guardado, validadas contra el catálogo.
pub async fn preferences_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();
    let saved = match state.input_for(&session_id) {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(json!({"error": format!("no user input saved for session '{}'", session_id)})),
    };

    let prefs = parse_user_input(&saved.user_input, &state.catalog);
    let candidates = match candidates_for(&prefs, &state.catalog) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };

    HttpResponse::Ok().json(json!({
        "user_input": saved.user_input,
        "preferences": prefs,
        "candidates": candidates.len(),
    }))
}
