//! Per-item reshaping of provider results.
//!
//! `popularity_placeholder` and `store_count_placeholder` are stand-ins: no
//! search-volume or marketplace source is consulted yet.

use futures::future::try_join_all;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::LazyLock;
use tokio::task::JoinError;

use crate::provider::BookItem;

pub const DEFAULT_CATEGORY: &str = "기타";

/// Seller count reported for any item that has a link.
pub const LINKED_STORE_COUNT: u32 = 3;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// A reshaped search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResult {
    pub title: String,
    pub total: u32,
    pub store_count: u32,
    pub category: String,
    pub link: String,
}

/// Remove every `<...>` tag from a title.
pub fn sanitize_title(title: &str) -> String {
    TAG_PATTERN.replace_all(title, "").into_owned()
}

/// Deterministic search-volume stand-in derived from a SHA-256 of the title.
/// Always within `1500..=11498`.
pub fn popularity_placeholder(title: &str) -> u32 {
    let digest = Sha256::digest(title.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let hash = u64::from_be_bytes(prefix);

    let pc = (hash % 4000) as u32 + 500;
    let mobile = (hash % 6000) as u32 + 1000;
    pc + mobile
}

/// Seller-count stand-in: 1 without a link, otherwise a fixed count.
pub fn store_count_placeholder(link: Option<&str>) -> u32 {
    match link {
        Some(link) if !link.is_empty() => LINKED_STORE_COUNT,
        _ => 1,
    }
}

pub fn enrich(item: BookItem) -> BookResult {
    let title = sanitize_title(&item.title);
    let total = popularity_placeholder(&title);
    let store_count = store_count_placeholder(Some(&item.link));
    let category = item
        .category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    BookResult {
        title,
        total,
        store_count,
        category,
        link: item.link,
    }
}

/// Enrich every item concurrently, keeping provider order.
pub async fn enrich_all(items: Vec<BookItem>) -> Result<Vec<BookResult>, JoinError> {
    try_join_all(
        items
            .into_iter()
            .map(|item| tokio::spawn(async move { enrich(item) })),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, link: &str, category: Option<&str>) -> BookItem {
        BookItem {
            title: title.to_string(),
            link: link.to_string(),
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn strips_tags() {
        assert_eq!(sanitize_title("<b>Dune</b>"), "Dune");
        assert_eq!(sanitize_title("<b>해리</b> 포터와 <i>마법사</i>의 돌"), "해리 포터와 마법사의 돌");
        assert_eq!(sanitize_title("plain"), "plain");
        assert_eq!(sanitize_title(""), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in ["<b>Dune</b>", "a<<b>>c", "1 < 2", "<a<b>>x>", "x > y <z"] {
            let once = sanitize_title(input);
            assert_eq!(sanitize_title(&once), once, "input: {input}");
        }
    }

    #[test]
    fn popularity_is_deterministic_and_bounded() {
        for title in ["Dune", "", "해리 포터", "The Rust Programming Language"] {
            let first = popularity_placeholder(title);
            assert_eq!(first, popularity_placeholder(title));
            assert!((1500..=11498).contains(&first), "{title}: {first}");
        }
    }

    #[test]
    fn store_count_depends_on_link() {
        assert_eq!(store_count_placeholder(None), 1);
        assert_eq!(store_count_placeholder(Some("")), 1);
        assert_eq!(store_count_placeholder(Some("http://x")), LINKED_STORE_COUNT);
    }

    #[test]
    fn enrich_defaults_empty_category() {
        let result = enrich(item("<b>Dune</b>", "http://x", Some("")));
        assert_eq!(
            result,
            BookResult {
                title: "Dune".to_string(),
                total: popularity_placeholder("Dune"),
                store_count: 3,
                category: DEFAULT_CATEGORY.to_string(),
                link: "http://x".to_string(),
            }
        );

        let missing = enrich(item("Dune", "", None));
        assert_eq!(missing.category, DEFAULT_CATEGORY);
        assert_eq!(missing.store_count, 1);
    }

    #[test]
    fn enrich_keeps_provider_category() {
        let result = enrich(item("Dune", "http://x", Some("소설")));
        assert_eq!(result.category, "소설");
    }

    #[tokio::test]
    async fn enrich_all_preserves_order() {
        let items = (0..5)
            .map(|i| item(&format!("<b>Book {i}</b>"), "http://x", None))
            .collect();
        let results = enrich_all(items).await.unwrap();
        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Book 0", "Book 1", "Book 2", "Book 3", "Book 4"]);
    }

    #[test]
    fn result_serializes_camel_case() {
        let json = serde_json::to_value(enrich(item("Dune", "http://x", None))).unwrap();
        assert_eq!(json["storeCount"], 3);
        assert!(json.get("store_count").is_none());
    }
}
