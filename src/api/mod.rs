pub mod batch;
pub mod handlers;
pub mod models;
pub mod search;

// Re-exports
pub use handlers::{health_handler, root_handler};
pub use models::*;

use crate::config::AppConfig;
use crate::provider::BookSearchClient;
use crate::storage::JobStore;
use axum::{Router, routing::get};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            books: BookSearchClient::new(&config.provider),
            jobs: JobStore::with_retention(Duration::from_secs(config.batch.job_retention_secs)),
            keyword_delay: Duration::from_millis(config.batch.keyword_delay_ms),
        }
    }
}

/// Build the full router with modular routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(search::routes())
        .merge(batch::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
