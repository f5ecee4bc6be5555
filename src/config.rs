use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const DEFAULT_BASE_URL: &str = "https://openapi.naver.com/v1/search/book.json";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Book-search provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Page size requested from the provider (1..=100)
    pub display: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            display: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub keyword_delay_ms: u64,
    /// How long a completed job stays queryable
    pub job_retention_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            keyword_delay_ms: 300,
            job_retention_secs: 3600,
        }
    }
}

impl AppConfig {
    /// Load from `config.toml` (or `$BOOKALL_CONFIG`) and the process environment
    pub fn load() -> Result<Self> {
        let path = std::env::var("BOOKALL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = Path::new(&path);

        let contents = if path.exists() {
            Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {:?}", path))?,
            )
        } else {
            None
        };

        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build a config from optional TOML contents, then apply environment overrides.
    pub fn from_sources<F>(contents: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: AppConfig = match contents {
            Some(text) => toml::from_str(text).context("Failed to parse config file")?,
            None => AppConfig::default(),
        };

        if let Some(port) = lookup("PORT") {
            config.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }
        if let Some(id) = lookup("NAVER_CLIENT_ID") {
            config.provider.client_id = id;
        }
        if let Some(secret) = lookup("NAVER_CLIENT_SECRET") {
            config.provider.client_secret = secret;
        }

        config.provider.display = config.provider.display.clamp(1, 100);

        Ok(config)
    }

    pub fn has_credentials(&self) -> bool {
        !self.provider.client_id.is_empty() && !self.provider.client_secret.is_empty()
    }
}
