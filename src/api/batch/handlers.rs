use crate::api::models::*;
use crate::batch::run_job;
use crate::export::{EXPORT_FILENAME, XLSX_CONTENT_TYPE, rows_to_xlsx};
use crate::storage::Job;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;
use uuid::Uuid;

pub async fn start_handler(
    State(state): State<AppState>,
    payload: Result<Json<StartJobRequest>, JsonRejection>,
) -> Result<Json<StartJobResponse>, AppError> {
    let Json(request) = payload?;
    let keywords = request.into_keywords().map_err(AppError::BadRequest)?;

    let job_id = state.jobs.create().await;
    info!(%job_id, keywords = keywords.len(), "Batch job queued");

    tokio::spawn(run_job(
        state.books.clone(),
        state.jobs.clone(),
        job_id,
        keywords,
        state.keyword_delay,
    ));

    Ok(Json(StartJobResponse { job_id }))
}

pub async fn status_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, AppError> {
    let id = Uuid::parse_str(&job_id).map_err(|_| AppError::NotFound(job_id.clone()))?;

    state
        .jobs
        .get(&id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound(job_id))
}

/// Export posted rows as an xlsx attachment
pub async fn download_handler(
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;

    let bytes = rows_to_xlsx(&request.results)
        .map_err(|e| AppError::Internal(format!("Spreadsheet export failed: {}", e)))?;

    info!(rows = request.results.len(), "Exported spreadsheet");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", EXPORT_FILENAME),
            ),
        ],
        bytes,
    )
        .into_response())
}
