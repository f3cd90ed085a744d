//! Page fetching
//!
//! [`PageFetcher`] is the seam between the pipeline and the network. The
//! reqwest implementation, [`HttpFetcher`], adds:
//! - Rate limiting with governor
//! - Charset detection from `Content-Type` or `<meta charset>`
//! - Browser-like `Accept` headers
//!
//! There are no retries: a failed fetch means the URL is skipped.

use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use regex::bytes::Regex;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE},
    Client, Response,
};
use std::num::NonZeroU32;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

use crate::config::CrawlerConfig;
use crate::utils::error::FetchError;

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([a-zA-Z0-9_\-:.]+)"#).unwrap()
});

/// Source of raw page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page body, reporting why it failed
    async fn try_fetch(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch a page body; failures are logged and become `None`
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Fetch failed");
                None
            }
        }
    }
}

/// reqwest-based fetcher with rate limiting
pub struct HttpFetcher {
    /// HTTP client with configured timeout, user agent and compression
    client: Client,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpFetcher {
    /// Create a fetcher from crawler configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout())
            .default_headers(Self::build_headers())
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(quota_for(config.rate_limit)),
        })
    }

    /// Standard browser headers sent with every request
    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        headers
    }

    /// Decode response body using the declared or sniffed charset
    async fn decode_response(response: Response) -> Result<String, FetchError> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response.bytes().await.map_err(FetchError::from_transport)?;

        Ok(decode_bytes(&bytes, &content_type))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        self.rate_limiter.until_ready().await;

        tracing::debug!(url = %parsed, "Fetching URL");

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Self::decode_response(response).await
    }
}

/// Quota for a possibly fractional requests-per-second rate
fn quota_for(rate: f64) -> Quota {
    if rate >= 1.0 {
        let per_second = NonZeroU32::new(rate.round() as u32).unwrap_or(NonZeroU32::MIN);
        Quota::per_second(per_second)
    } else if rate > 0.0 {
        Quota::with_period(Duration::from_secs_f64(1.0 / rate))
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
    } else {
        Quota::per_second(NonZeroU32::MIN)
    }
}

/// Decode bytes to a UTF-8 string
///
/// Strategy:
/// 1. `charset=` parameter of the Content-Type header
/// 2. `<meta charset>` / `http-equiv` declaration in the first 1024 bytes
/// 3. UTF-8, with replacement characters for invalid sequences
///
/// A byte-order mark overrides all of the above.
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> String {
    let encoding = charset_from_content_type(content_type)
        .or_else(|| charset_from_meta(bytes))
        .unwrap_or(UTF_8);

    let (cow, _encoding, _had_errors) = encoding.decode(bytes);
    cow.into_owned()
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches('"').as_bytes()))
}

fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(1024)];
    META_CHARSET
        .captures(head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
}
