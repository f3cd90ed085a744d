//! Configuration management for the gazette crawler
//!
//! Layers, lowest to highest precedence: built-in defaults, an optional TOML
//! file, then `GAZETTE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target site layout
    pub site: SiteConfig,

    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Summarization backend
    pub summarizer: SummarizerConfig,

    /// HTTP server
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where listings live on the gazette site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root; search is `{base_url}?s=...`, relative links resolve here
    pub base_url: String,

    /// Category page path, relative to `base_url`
    pub category_path: String,

    /// CSS selector for posting links on index pages
    pub result_selector: String,

    /// Links taken from a search results page
    pub search_limit: usize,

    /// Links taken from the category page
    pub category_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://www.gazette.lk/"),
            category_path: String::from("category/jobs/"),
            result_selector: String::from("h2.entry-title a"),
            search_limit: 3,
            category_limit: 10,
        }
    }
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Posting pages processed at once; 1 keeps processing sequential
    pub max_concurrent_requests: usize,

    /// Rate limit (requests per second)
    pub rate_limit: f64,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 1,
            rate_limit: 5.0,
            request_timeout_secs: 30,
            user_agent: format!("gazette-jobs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlerConfig {
    /// Per-request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Summarizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Backend name: "lead" or "ollama"
    pub backend: String,

    /// Ollama endpoint URL
    pub endpoint: String,

    /// Ollama model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Minimum summary length in words
    pub min_length: usize,

    /// Maximum summary length in words
    pub max_length: usize,

    /// Characters of page text handed to the summarizer
    pub max_input_chars: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            backend: String::from("lead"),
            endpoint: String::from("http://localhost:11434"),
            model: String::from("qwen2.5:7b"),
            timeout_secs: 60,
            min_length: 30,
            max_length: 120,
            max_input_chars: 1024,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Allow any origin, method and header
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 5000,
            enable_cors: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env_var(key).and_then(|v| v.trim().parse::<T>().ok())
}

impl Config {
    /// Defaults overlaid with environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load configuration from a TOML file
    ///
    /// Missing sections and keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::with_source(format!("Failed to read config file: {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::with_source(
                format!("Failed to parse TOML config file: {}", path.display()),
                e,
            )
        })
    }

    /// Full layering: file (if given) or defaults, then environment, then validation
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Overlay `GAZETTE_*` environment variables
    pub fn apply_env(&mut self) {
        if let Some(v) = env_var("GAZETTE_BASE_URL") {
            self.site.base_url = v;
        }
        if let Some(v) = env_var("GAZETTE_CATEGORY_PATH") {
            self.site.category_path = v;
        }
        if let Some(v) = env_parse("GAZETTE_SEARCH_LIMIT") {
            self.site.search_limit = v;
        }
        if let Some(v) = env_parse("GAZETTE_CATEGORY_LIMIT") {
            self.site.category_limit = v;
        }
        if let Some(v) = env_parse("GAZETTE_MAX_CONCURRENT_REQUESTS") {
            self.crawler.max_concurrent_requests = v;
        }
        if let Some(v) = env_parse("GAZETTE_RATE_LIMIT") {
            self.crawler.rate_limit = v;
        }
        if let Some(v) = env_parse("GAZETTE_REQUEST_TIMEOUT") {
            self.crawler.request_timeout_secs = v;
        }
        if let Some(v) = env_var("GAZETTE_USER_AGENT") {
            self.crawler.user_agent = v;
        }
        if let Some(v) = env_var("GAZETTE_SUMMARIZER") {
            self.summarizer.backend = v;
        }
        if let Some(v) = env_var("OLLAMA_ENDPOINT") {
            self.summarizer.endpoint = v;
        }
        if let Some(v) = env_var("OLLAMA_MODEL") {
            self.summarizer.model = v;
        }
        if let Some(v) = env_parse("OLLAMA_TIMEOUT") {
            self.summarizer.timeout_secs = v;
        }
        if let Some(v) = env_var("GAZETTE_HOST") {
            self.server.host = v;
        }
        if let Some(v) = env_parse("GAZETTE_PORT") {
            self.server.port = v;
        }
        if let Some(v) = env_parse("GAZETTE_ENABLE_CORS") {
            self.server.enable_cors = v;
        }
        if let Some(v) = env_var("GAZETTE_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = env_var("GAZETTE_LOG_FORMAT") {
            self.logging.format = v;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.site.base_url)
            .map_err(|e| Error::config(format!("Invalid base_url '{}': {e}", self.site.base_url)))?;

        if self.site.search_limit == 0 || self.site.category_limit == 0 {
            return Err(Error::config("search_limit and category_limit must be greater than 0"));
        }

        if self.crawler.max_concurrent_requests == 0 {
            return Err(Error::config("max_concurrent_requests must be greater than 0"));
        }

        if self.crawler.rate_limit <= 0.0 {
            return Err(Error::config("rate_limit must be positive"));
        }

        if self.summarizer.min_length > self.summarizer.max_length {
            return Err(Error::config("summarizer min_length must not exceed max_length"));
        }

        if self.summarizer.max_input_chars == 0 {
            return Err(Error::config("max_input_chars must be greater than 0"));
        }

        if !matches!(self.summarizer.backend.as_str(), "lead" | "ollama") {
            return Err(Error::config(format!(
                "Unknown summarizer backend: {}",
                self.summarizer.backend
            )));
        }

        Ok(())
    }

    /// Server bind address
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_limits() {
        let config = Config::default();
        assert_eq!(config.site.search_limit, 3);
        assert_eq!(config.site.category_limit, 10);
        assert_eq!(config.summarizer.max_input_chars, 1024);
    }

    #[test]
    fn test_invalid_concurrent_requests() {
        let mut config = Config::default();
        config.crawler.max_concurrent_requests = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_summary_bounds() {
        let mut config = Config::default();
        config.summarizer.min_length = 200;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.site.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[site]\nsearch_limit = 5\n").unwrap();
        assert_eq!(config.site.search_limit, 5);
        assert_eq!(config.site.category_limit, 10);
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config::default();
        assert_eq!(config.crawler.request_timeout(), Duration::from_secs(30));

        let crawler = CrawlerConfig {
            request_timeout_secs: 2,
            ..CrawlerConfig::default()
        };
        assert_eq!(crawler.request_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(Config::default().bind_address(), "127.0.0.1:5000");
    }
}
