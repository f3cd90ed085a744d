//! Error types for the gazette crawler
//!
//! Each pipeline stage has its own error type. A stage error only affects
//! its URL: the collector turns it into a skip instead of propagating it.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport error (DNS, connection, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Map a reqwest error, separating timeouts from other transport failures
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors that can occur while turning markup into usable text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Page has no visible text at all
    #[error("No visible text on page")]
    NoText,

    /// CSS selector failed to parse
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Errors raised by a summarization backend
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// Input text was empty after trimming
    #[error("Cannot summarize empty text")]
    EmptyInput,

    /// Backend request failed
    #[error("Summarizer request failed: {0}")]
    Request(String),

    /// Backend answered but produced no text
    #[error("Summarizer returned an empty summary")]
    EmptyOutput,
}

impl From<reqwest::Error> for SummarizeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}
