use crate::export::ExportRow;
use crate::provider::{BookSearchClient, ProviderError};
use crate::storage::JobStore;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

pub const MISSING_KEYWORD_MESSAGE: &str = "keyword 필요";
pub const SEARCH_FAILED_MESSAGE: &str = "검색 실패";
pub const NOT_FOUND_MESSAGE: &str = "not found";
pub const KEYWORDS_REQUIRED_MESSAGE: &str = "keywords 필요";
pub const INVALID_QUERY_MESSAGE: &str = "invalid query string";
pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub books: BookSearchClient,
    pub jobs: JobStore,
    pub keyword_delay: Duration,
}

/// Query string of `GET /search`
#[derive(Debug)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

impl SearchParams {
    /// First `keyword` pair wins; repeats are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let keyword = pairs
            .into_iter()
            .find(|(key, _)| key == "keyword")
            .map(|(_, value)| value);
        Self { keyword }
    }

    /// The keyword, if present and non-empty
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }
}

/// Request to start a batch job
#[derive(Debug, Deserialize)]
pub struct StartJobRequest {
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl StartJobRequest {
    /// Drop blank entries; fails when nothing is left
    pub fn into_keywords(self) -> Result<Vec<String>, String> {
        let keywords: Vec<String> = self
            .keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err(KEYWORDS_REQUIRED_MESSAGE.to_string());
        }
        Ok(keywords)
    }
}

#[derive(Debug, Serialize)]
pub struct StartJobResponse {
    pub job_id: Uuid,
}

/// Request to export batch rows as a spreadsheet
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub results: Vec<ExportRow>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing keyword")]
    MissingKeyword,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("upstream failure: {0}")]
    Upstream(#[from] ProviderError),

    #[error("internal failure: {0}")]
    Internal(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        debug!("Rejected query string: {}", rejection.body_text());
        AppError::BadRequest(INVALID_QUERY_MESSAGE.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        AppError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingKeyword => (StatusCode::BAD_REQUEST, MISSING_KEYWORD_MESSAGE.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            AppError::Upstream(e) => {
                error!("Upstream error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SEARCH_FAILED_MESSAGE.to_string())
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, SEARCH_FAILED_MESSAGE.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_keyword_is_missing() {
        let params = SearchParams {
            keyword: Some(String::new()),
        };
        assert!(params.keyword().is_none());
        assert!(SearchParams { keyword: None }.keyword().is_none());
        assert_eq!(
            SearchParams {
                keyword: Some("dune".to_string())
            }
            .keyword(),
            Some("dune")
        );
    }

    #[test]
    fn first_keyword_pair_wins() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("keyword".to_string(), "a".to_string()),
            ("keyword".to_string(), "b".to_string()),
        ];
        assert_eq!(SearchParams::from_pairs(pairs).keyword(), Some("a"));
        assert!(SearchParams::from_pairs(Vec::new()).keyword().is_none());
    }

    #[test]
    fn start_request_drops_blank_keywords() {
        let request = StartJobRequest {
            keywords: vec![" dune ".to_string(), "  ".to_string(), "해리 포터".to_string()],
        };
        assert_eq!(request.into_keywords().unwrap(), ["dune", "해리 포터"]);

        let empty = StartJobRequest {
            keywords: vec!["".to_string()],
        };
        assert_eq!(empty.into_keywords().unwrap_err(), KEYWORDS_REQUIRED_MESSAGE);
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::MissingKeyword.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("boom".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Upstream(ProviderError::Status { status: 401 })
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::NotFound("job".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
