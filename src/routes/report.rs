use rocket::http::Header;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::db::DirectoryState;
use crate::guards::AdminGuard;
use crate::models::{WorkerRecord, WorkerStats};
use crate::services::export;
use crate::utils::{ApiError, ApiResponse};

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 100;

/// Missing or blank means the default; anything else must be a positive integer.
fn resolve_limit(limit: Option<&str>) -> Result<usize, ApiError> {
    let limit = match limit.map(str::trim).filter(|l| !l.is_empty()) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ApiError::bad_request(format!("Invalid limit: {}", raw)))?,
        None => DEFAULT_LIMIT,
    };

    match limit {
        0 => Err(ApiError::bad_request("Limit must be at least 1")),
        n => Ok(n.min(MAX_LIMIT)),
    }
}

#[derive(Responder)]
#[response(content_type = "json")]
pub struct ReportDownload {
    body: String,
    disposition: Header<'static>,
}

// ==================== DASHBOARD ====================

#[openapi(tag = "Reports")]
#[get("/reports/stats")]
pub async fn get_stats(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
) -> Json<ApiResponse<WorkerStats>> {
    Json(ApiResponse::success(directory.read().await.stats()))
}

#[openapi(tag = "Reports")]
#[get("/reports/recent?<limit>")]
pub async fn get_recent_workers(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    limit: Option<String>,
) -> Result<Json<ApiResponse<Vec<WorkerRecord>>>, ApiError> {
    let limit = resolve_limit(limit.as_deref())?;
    let workers = directory.read().await.recent(limit).into_iter().cloned().collect();

    Ok(Json(ApiResponse::success(workers)))
}

// ==================== PERFORMANCE ====================

#[openapi(tag = "Reports")]
#[get("/reports/top-performers?<limit>")]
pub async fn get_top_performers(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    limit: Option<String>,
) -> Result<Json<ApiResponse<Vec<WorkerRecord>>>, ApiError> {
    let limit = resolve_limit(limit.as_deref())?;
    let workers = directory
        .read()
        .await
        .top_performers(limit)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ApiResponse::success(workers)))
}

// ==================== EXPORT ====================

/// Stats, top performers and recent workers as one pretty JSON attachment.
#[openapi(skip)]
#[get("/reports/export/json?<limit>")]
pub async fn export_report_json(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    limit: Option<String>,
) -> Result<ReportDownload, ApiError> {
    let limit = resolve_limit(limit.as_deref())?;
    let report = directory
        .read()
        .await
        .report(limit, chrono::Local::now().date_naive());

    let body = export::report_to_json(&report)
        .map_err(|e| ApiError::internal_error(format!("Export failed: {}", e)))?;
    let disposition = Header::new(
        "Content-Disposition",
        format!("attachment; filename=\"{}\"", export::report_file_name(&report)),
    );

    Ok(ReportDownload { body, disposition })
}
