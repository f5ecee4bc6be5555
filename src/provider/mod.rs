//! Client for the external book-search provider.

pub mod client;
pub mod error;

pub use client::{BookItem, BookSearchClient};
pub use error::ProviderError;
