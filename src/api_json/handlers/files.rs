use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::error::{Result, ScheduleError};
use crate::server::AppState;

/// Rejects names that could escape the upload directory.
pub fn sanitize_file_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ScheduleError::InvalidFileName(name.to_string()));
    }
    Ok(name.to_string())
}

async fn write_field(
    field: &mut actix_multipart::Field,
    path: &Path,
    filename: &str,
) -> std::result::Result<(), HttpResponse> {
    let mut f = tokio::fs::File::create(path)
        .await
        .map_err(|e| HttpResponse::InternalServerError().json(json!({"error": format!("failed to create file: {}", e)})))?;
    while let Some(chunk) = field.next().await {
        let bytes = chunk.map_err(|e| {
            warn!(file = %filename, error = %e, "upload stream error");
            HttpResponse::BadRequest().json(json!({"error": format!("upload stream error: {}", e)}))
        })?;
        f.write_all(&bytes)
            .await
            .map_err(|e| HttpResponse::InternalServerError().json(json!({"error": format!("failed to write file: {}", e)})))?;
    }
    f.flush()
        .await
        .map_err(|e| HttpResponse::InternalServerError().json(json!({"error": format!("failed to write file: {}", e)})))
}

/// POST /api/upload-file/ (multipart, campo `file`)
pub async fn upload_file_handler(state: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    let base = state.upload_dir.as_path();
    if let Err(e) = tokio::fs::create_dir_all(base).await {
        return HttpResponse::InternalServerError().json(json!({"error": format!("failed to create upload dir: {}", e)}));
    }

    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("multipart error: {}", e)})),
        };
        if field.name() != "file" {
            continue;
        }

        let raw_name = field.content_disposition().get_filename().map(|s| s.to_string()).unwrap_or_default();
        let filename = match sanitize_file_name(&raw_name) {
            Ok(n) => n,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
        };

        let filepath = base.join(&filename);
        // written under a temporary name, renamed once complete
        let partial = base.join(format!("{}.part", filename));
        if let Err(resp) = write_field(&mut field, &partial, &filename).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return resp;
        }
        if let Err(e) = tokio::fs::rename(&partial, &filepath).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return HttpResponse::InternalServerError().json(json!({"error": format!("failed to write file: {}", e)}));
        }

        info!(file = %filename, "file uploaded");
        return HttpResponse::Ok().json(json!({"message": format!("File '{}' uploaded successfully.", filename)}));
    }

    HttpResponse::BadRequest().json(json!({"error": "No file uploaded"}))
}

/// GET /api/download-file/?filename=final_schedule.json
pub async fn download_file_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let name = match query.get("filename") {
        Some(n) if !n.trim().is_empty() => n.clone(),
        _ => return HttpResponse::BadRequest().json(json!({"error": "No filename provided"})),
    };
    let name = match sanitize_file_name(&name) {
        Ok(n) => n,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    };

    let path = state.upload_dir.join(&name);
    if !path.is_file() {
        return HttpResponse::NotFound().json(json!({"error": "File not found"}));
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = match path.extension().and_then(std::ffi::OsStr::to_str) {
                Some("json") => "application/json",
                Some("csv") => "text/csv",
                _ => "application/octet-stream",
            };
            HttpResponse::Ok()
                .content_type(mime)
                .append_header((actix_web::http::header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", name)))
                .body(bytes)
        }
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("failed to read file: {}", e)})),
    }
}
