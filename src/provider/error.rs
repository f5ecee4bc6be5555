use thiserror::Error;

/// Failures while talking to the book-search provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider returned status {status}")]
    Status { status: u16 },

    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}
