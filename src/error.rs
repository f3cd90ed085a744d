//! Unified error handling for the gazette-jobs crate
//!
//! Domain-specific errors live in [`crate::utils::error`]; this module wraps
//! them into a single [`Error`] enum for code that crosses module boundaries.
//!
//! # Architecture
//!
//! - [`CategorizedError`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors

use thiserror::Error;

pub use crate::utils::error::{ExtractError, FetchError, SummarizeError};

/// Common trait for all crate error types
pub trait CategorizedError: std::error::Error {
    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, status)
    Network,
    /// Markup and text extraction errors
    Parsing,
    /// Summarization backend errors
    Summarization,
    /// Configuration and validation errors
    Config,
    /// Invalid client request
    Request,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Short label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Summarization => "summarization",
            Self::Config => "config",
            Self::Request => "request",
            Self::Other => "other",
        }
    }
}

impl CategorizedError for FetchError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Network
    }
}

impl CategorizedError for ExtractError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::NoText => ErrorCategory::Parsing,
            Self::Selector { .. } => ErrorCategory::Config,
        }
    }
}

impl CategorizedError for SummarizeError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Summarization
    }
}

/// Unified error type for the gazette-jobs crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Extraction-specific errors
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Summarization errors
    #[error("Summarize error: {0}")]
    Summarize(#[from] SummarizeError),

    /// Search request without a usable query
    #[error("No query provided")]
    MissingQuery,

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CategorizedError for Error {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Extract(e) => e.category(),
            Self::Summarize(e) => e.category(),
            Self::MissingQuery => ErrorCategory::Request,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the caller, not the system, is at fault
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Request
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
