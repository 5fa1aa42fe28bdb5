use rocket::http::ContentType;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::db::DirectoryState;
use crate::guards::AdminGuard;
use crate::models::{
    NewWorker, UpdateStatusDto, WorkerFilter, WorkerListQuery, WorkerRecord, WorkerUpdate,
};
use crate::services::export;
use crate::utils::{validate_new_worker, validate_worker_update, ApiError, ApiResponse};

fn cloned(workers: Vec<&WorkerRecord>) -> Vec<WorkerRecord> {
    workers.into_iter().cloned().collect()
}

fn parse_criteria(query: &WorkerListQuery) -> Result<WorkerFilter, ApiError> {
    query.criteria().map_err(ApiError::bad_request)
}

// ============================================================================
// LISTING / LOOKUP
// ============================================================================

/// Search text first, then status / specialization / min_rating on the hits.
#[openapi(tag = "Workers")]
#[get("/workers?<query..>")]
pub async fn list_workers(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    query: WorkerListQuery,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let criteria = parse_criteria(&query)?;
    let directory = directory.read().await;
    let workers = cloned(directory.composed_query(query.search_text(), &criteria));

    Ok(Json(ApiResponse::success(serde_json::json!({
        "workers": workers,
        "count": workers.len(),
        "total": directory.len(),
    }))))
}

#[openapi(tag = "Workers")]
#[get("/workers/specializations")]
pub async fn get_specializations(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::success(directory.read().await.specializations()))
}

#[openapi(tag = "Workers")]
#[get("/workers/<worker_id>")]
pub async fn get_worker(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    worker_id: String,
) -> Result<Json<ApiResponse<WorkerRecord>>, ApiError> {
    let worker = directory
        .read()
        .await
        .get_by_id(&worker_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Worker not found"))?;

    Ok(Json(ApiResponse::success(worker)))
}

// ============================================================================
// MUTATIONS
// ============================================================================

#[openapi(tag = "Workers")]
#[post("/workers", data = "<dto>")]
pub async fn create_worker(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    dto: Json<NewWorker>,
) -> Result<Json<ApiResponse<WorkerRecord>>, ApiError> {
    validate_new_worker(&dto)?;

    let worker = directory.write().await.add(dto.into_inner());

    Ok(Json(ApiResponse::success_with_message(
        "Worker created successfully",
        worker,
    )))
}

#[openapi(tag = "Workers")]
#[put("/workers/<worker_id>", data = "<dto>")]
pub async fn update_worker(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    worker_id: String,
    dto: Json<WorkerUpdate>,
) -> Result<Json<ApiResponse<WorkerRecord>>, ApiError> {
    validate_worker_update(&dto)?;

    let worker = directory.write().await.update(&worker_id, dto.into_inner())?;

    Ok(Json(ApiResponse::success_with_message(
        "Worker updated successfully",
        worker,
    )))
}

#[openapi(tag = "Workers")]
#[put("/workers/<worker_id>/status", data = "<dto>")]
pub async fn update_worker_status(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    worker_id: String,
    dto: Json<UpdateStatusDto>,
) -> Result<Json<ApiResponse<WorkerRecord>>, ApiError> {
    let worker = directory.write().await.set_status(&worker_id, dto.status)?;

    Ok(Json(ApiResponse::success_with_message(
        format!("Worker status updated to {}", worker.status),
        worker,
    )))
}

#[openapi(tag = "Workers")]
#[delete("/workers/<worker_id>")]
pub async fn delete_worker(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    worker_id: String,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let removed = directory.write().await.remove(&worker_id)?;

    Ok(Json(ApiResponse::success_with_message(
        "Worker deleted successfully",
        serde_json::json!({ "id": removed.id }),
    )))
}

// ============================================================================
// EXPORT
// ============================================================================

#[openapi(skip)]
#[get("/workers/export/csv?<query..>")]
pub async fn export_workers_csv(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    query: WorkerListQuery,
) -> Result<(ContentType, String), ApiError> {
    let criteria = parse_criteria(&query)?;
    let directory = directory.read().await;
    let workers = directory.composed_query(query.search_text(), &criteria);

    Ok((ContentType::CSV, export::to_csv(&workers)))
}

#[openapi(skip)]
#[get("/workers/export/json?<query..>")]
pub async fn export_workers_json(
    directory: &State<DirectoryState>,
    _admin: AdminGuard,
    query: WorkerListQuery,
) -> Result<(ContentType, String), ApiError> {
    let criteria = parse_criteria(&query)?;
    let directory = directory.read().await;
    let workers = directory.composed_query(query.search_text(), &criteria);

    let body = export::to_json(&workers)
        .map_err(|e| ApiError::internal_error(format!("Export failed: {}", e)))?;

    Ok((ContentType::JSON, body))
}
