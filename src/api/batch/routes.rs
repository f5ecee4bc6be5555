use crate::api::batch::handlers::{download_handler, start_handler, status_handler};
use crate::api::models::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_handler))
        .route("/status/{job_id}", get(status_handler))
        .route("/download", post(download_handler))
}
