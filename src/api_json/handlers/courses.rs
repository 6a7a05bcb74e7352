use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

use crate::algorithm::filters::apply_filter;
use crate::api_json::{error_response, filter_from_query};
use crate::models::CourseSection;
use crate::server::AppState;

pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Serialize)]
struct CoursePage<'a> {
    count: usize,
    page: usize,
    page_size: usize,
    next: Option<usize>,
    previous: Option<usize>,
    results: &'a [CourseSection],
}

pub async fn welcome_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({"message": "Welcome to the Schedule Sooner API!"}))
}

/// GET /cs/courses/?page=2&meeting_days=MWF&instructor=sridhar
/// Listado paginado (50 por página) del catálogo filtrado.
pub async fn courses_list_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let qm = query.into_inner();
    let page = match qm.get("page").map(|p| p.trim()).filter(|p| !p.is_empty()) {
        None => 1,
        Some(p) => match p.parse::<usize>() {
            Ok(n) if n >= 1 => n,
            _ => return HttpResponse::NotFound().json(json!({"error": "Invalid page."})),
        },
    };

    let filter = filter_from_query(&qm);
    let filtered = match apply_filter(&state.catalog, &filter) {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };

    let count = filtered.len();
    let pages = count.div_ceil(PAGE_SIZE).max(1);
    if page > pages {
        return HttpResponse::NotFound().json(json!({"error": "Invalid page."}));
    }
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(count);

    HttpResponse::Ok().json(CoursePage {
        count,
        page,
        page_size: PAGE_SIZE,
        next: if page < pages { Some(page + 1) } else { None },
        previous: if page > 1 { Some(page - 1) } else { None },
        results: &filtered[start..end],
    })
}
