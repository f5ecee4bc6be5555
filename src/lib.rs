//! HTTP relay in front of an external book-search provider.

pub mod api;
pub mod batch;
pub mod config;
pub mod enrich;
pub mod export;
pub mod provider;
pub mod storage;

pub use api::{AppState, create_router};
pub use config::AppConfig;
