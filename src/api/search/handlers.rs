use crate::api::models::*;
use crate::enrich::{BookResult, enrich_all};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::info;

pub async fn search_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<BookResult>>, AppError> {
    let Query(pairs) = query?;
    let params = SearchParams::from_pairs(pairs);
    let keyword = params.keyword().ok_or(AppError::MissingKeyword)?;

    info!(keyword = %keyword, "Searching");

    // Lookup
    let items = state.books.search(keyword).await?;

    // Enrich
    let results = enrich_all(items)
        .await
        .map_err(|e| AppError::Internal(format!("Enrichment failed: {}", e)))?;

    info!(found = results.len(), "Search complete");

    Ok(Json(results))
}
