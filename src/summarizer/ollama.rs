//! Ollama-backed summarizer
//!
//! Sends one non-streaming `/api/generate` request per text with greedy
//! decoding (temperature 0, top_k 1) so repeated calls on the same input
//! return the same summary.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Summarizer, SummaryBounds};
use crate::utils::error::SummarizeError;
use crate::utils::{cap_words, word_count};

/// Configuration for the Ollama summarizer
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Ollama endpoint URL (default: http://localhost:11434)
    pub endpoint: String,

    /// Model name to use
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Summary length bounds, in words
    pub bounds: SummaryBounds,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "qwen2.5:7b".to_string(),
            timeout_secs: 60,
            bounds: SummaryBounds::default(),
        }
    }
}

/// Ollama generate request
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

/// Ollama generation options
#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_k: u32,
    num_predict: u32,
}

/// Ollama generate response
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Summarizer that delegates to a local Ollama model
pub struct OllamaSummarizer {
    client: Client,
    config: OllamaConfig,
}

impl OllamaSummarizer {
    /// Create a summarizer with default config
    pub fn new() -> Result<Self, SummarizeError> {
        Self::with_config(OllamaConfig::default())
    }

    /// Create a summarizer with custom config
    pub fn with_config(config: OllamaConfig) -> Result<Self, SummarizeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Check if Ollama is reachable
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.endpoint.trim_end_matches('/'));
        self.client.get(&url).send().await.is_ok()
    }

    /// Build prompt for a bounded job-notice summary
    fn build_prompt(&self, text: &str) -> String {
        let SummaryBounds {
            min_length,
            max_length,
        } = self.config.bounds;

        format!(
            "Summarize the following job vacancy notice in {min_length} to {max_length} words. \
             Mention the post, the employer and any dates. Reply with the summary only.\n\n\
             Notice:\n{text}\n\nSummary:"
        )
    }

    /// Token budget for generation; words run a little over one token each
    fn num_predict(&self) -> u32 {
        u32::try_from(self.config.bounds.max_length.saturating_mul(2)).unwrap_or(u32::MAX)
    }

    async fn generate(&self, prompt: String) -> Result<String, SummarizeError> {
        let url = format!("{}/api/generate", self.config.endpoint.trim_end_matches('/'));

        let request = OllamaRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: 0.0,
                top_k: 1,
                num_predict: self.num_predict(),
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Request(format!(
                "Ollama request failed: {status} - {body}"
            )));
        }

        let ollama_response: OllamaResponse = response.json().await?;
        Ok(ollama_response.response)
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        let raw = self.generate(self.build_prompt(text)).await?;
        let summary = cap_words(raw.trim(), self.config.bounds.max_length);

        if summary.is_empty() {
            return Err(SummarizeError::EmptyOutput);
        }

        tracing::debug!(
            model = %self.config.model,
            words = word_count(&summary),
            "Generated summary"
        );

        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = OllamaConfig::default();
        assert_eq!(config.endpoint, "http://localhost:11434");
        assert_eq!(config.bounds, SummaryBounds::default());
    }

    #[test]
    fn test_prompt_carries_bounds_and_text() {
        let summarizer = OllamaSummarizer::new().unwrap();
        let prompt = summarizer.build_prompt("Applications are invited");
        assert!(prompt.contains("30 to 120 words"));
        assert!(prompt.contains("Applications are invited"));
    }

    #[test]
    fn test_num_predict() {
        let summarizer = OllamaSummarizer::new().unwrap();
        assert_eq!(summarizer.num_predict(), 240);
    }

    #[test]
    fn test_empty_input_rejected() {
        let summarizer = OllamaSummarizer::new().unwrap();
        let result = tokio_test::block_on(summarizer.summarize("   "));
        assert!(matches!(result, Err(SummarizeError::EmptyInput)));
    }
}
