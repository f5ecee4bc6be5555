//! Background processing for batch keyword jobs.

use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::enrich::{BookResult, DEFAULT_CATEGORY, enrich_all};
use crate::provider::BookSearchClient;
use crate::storage::{JobRow, JobStore};

const FALLBACK_LINK: &str = "#";

/// Row recorded when a keyword yields nothing usable.
pub fn fallback_row(keyword: &str) -> BookResult {
    BookResult {
        title: keyword.to_string(),
        total: 0,
        store_count: 1,
        category: DEFAULT_CATEGORY.to_string(),
        link: FALLBACK_LINK.to_string(),
    }
}

async fn lookup_first(client: &BookSearchClient, keyword: &str) -> BookResult {
    let items = match client.search(keyword).await {
        Ok(items) => items,
        Err(e) => {
            warn!(keyword = %keyword, "Batch lookup failed: {}", e);
            return fallback_row(keyword);
        }
    };

    match enrich_all(items).await {
        Ok(results) => results
            .into_iter()
            .next()
            .unwrap_or_else(|| fallback_row(keyword)),
        Err(e) => {
            warn!(keyword = %keyword, "Batch enrichment failed: {}", e);
            fallback_row(keyword)
        }
    }
}

/// Process `keywords` in order, publishing progress to `store` after each one.
pub async fn run_job(
    client: BookSearchClient,
    store: JobStore,
    job_id: Uuid,
    keywords: Vec<String>,
    delay: Duration,
) {
    store.mark_running(&job_id).await;
    info!(%job_id, keywords = keywords.len(), "Batch job started");

    let total = keywords.len();
    for (i, keyword) in keywords.iter().enumerate() {
        let row = lookup_first(&client, keyword).await;
        store
            .push_result(&job_id, JobRow::from(row), i + 1, total)
            .await;

        if i + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    store.complete(&job_id).await;
    info!(%job_id, "Batch job completed");
}
