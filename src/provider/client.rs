use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::config::ProviderConfig;
use crate::provider::error::ProviderError;

const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

/// One item as returned by the provider. `title` and `link` are required,
/// `category` may be missing.
#[derive(Debug, Clone, Deserialize)]
pub struct BookItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
struct BookSearchQuery<'a> {
    query: &'a str,
    display: u32,
}

#[derive(Debug, Deserialize)]
struct BookSearchResponse {
    items: Vec<BookItem>,
}

/// Book-search API client
#[derive(Debug, Clone)]
pub struct BookSearchClient {
    http_client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    display: u32,
}

impl BookSearchClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http_client: Client, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            display: config.display,
        }
    }

    pub fn display(&self) -> u32 {
        self.display
    }

    /// Query the provider for up to `display` items matching `keyword`.
    /// Provider order is preserved.
    #[instrument(skip(self), fields(display = self.display))]
    pub async fn search(&self, keyword: &str) -> Result<Vec<BookItem>, ProviderError> {
        debug!(url = %self.base_url, "Sending book search request");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&BookSearchQuery {
                query: keyword,
                display: self.display,
            })
            .header(CLIENT_ID_HEADER, &self.client_id)
            .header(CLIENT_SECRET_HEADER, &self.client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Book search provider error");
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: BookSearchResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("JSON parse error: {e}")))?;

        let items: Vec<BookItem> = parsed
            .items
            .into_iter()
            .take(self.display as usize)
            .collect();

        debug!(count = items.len(), "Book search completed");
        Ok(items)
    }
}
