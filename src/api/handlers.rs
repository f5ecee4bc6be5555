use crate::api::models::*;
use axum::Json;

pub const LIVENESS_MESSAGE: &str = "📚 bookall 서버 실행중";

/// Plain-text liveness endpoint
pub async fn root_handler() -> &'static str {
    LIVENESS_MESSAGE
}

/// Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
