//! Summarization backends
//!
//! The pipeline only depends on the [`Summarizer`] trait. Two backends ship
//! with the crate:
//!
//! - [`OllamaSummarizer`] - asks a local Ollama model, greedy decoding
//! - [`LeadSummarizer`] - offline, takes leading sentences of the text
//!
//! Callers truncate the input before summarizing; backends only enforce the
//! output length bounds.

pub mod lead;
pub mod ollama;

pub use lead::LeadSummarizer;
pub use ollama::{OllamaConfig, OllamaSummarizer};

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::SummarizerConfig;
use crate::error::{Error, Result};
use crate::utils::error::SummarizeError;

/// Target summary length, in the backend's own length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self {
            min_length: 30,
            max_length: 120,
        }
    }
}

/// Text summarization capability
///
/// Implementations must be deterministic: identical input yields identical
/// output. They are shared across concurrent URL tasks.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`, returning a trimmed, non-empty summary
    async fn summarize(&self, text: &str) -> std::result::Result<String, SummarizeError>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Build the backend selected in configuration
pub fn from_config(config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>> {
    let bounds = SummaryBounds {
        min_length: config.min_length,
        max_length: config.max_length,
    };

    match config.backend.as_str() {
        "lead" => Ok(Arc::new(LeadSummarizer::new(bounds))),
        "ollama" => {
            let summarizer = OllamaSummarizer::with_config(OllamaConfig {
                endpoint: config.endpoint.clone(),
                model: config.model.clone(),
                timeout_secs: config.timeout_secs,
                bounds,
            })
            .map_err(|e| Error::with_source("Failed to create Ollama summarizer", e))?;
            Ok(Arc::new(summarizer))
        }
        other => Err(Error::config(format!("Unknown summarizer backend: {other}"))),
    }
}
