//! Offline extractive summarizer
//!
//! Takes whole leading sentences until the minimum word count is reached,
//! then caps the result at the maximum word count. Deterministic by
//! construction and needs no model.

use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

use super::{Summarizer, SummaryBounds};
use crate::utils::error::SummarizeError;
use crate::utils::{cap_words, normalize_whitespace, word_count};

// Sentence end: terminal punctuation followed by whitespace
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Leading-sentences summarizer
#[derive(Debug, Clone, Default)]
pub struct LeadSummarizer {
    bounds: SummaryBounds,
}

impl LeadSummarizer {
    pub fn new(bounds: SummaryBounds) -> Self {
        Self { bounds }
    }

    fn lead(&self, text: &str) -> String {
        let text = normalize_whitespace(text);

        let mut summary = String::new();
        let mut start = 0;
        for boundary in SENTENCE_END.find_iter(&text) {
            // Keep the punctuation, drop the trailing whitespace
            let sentence = &text[start..boundary.start() + 1];
            push_sentence(&mut summary, sentence);
            start = boundary.end();

            if word_count(&summary) >= self.bounds.min_length {
                return cap_words(&summary, self.bounds.max_length);
            }
        }

        push_sentence(&mut summary, &text[start..]);
        cap_words(&summary, self.bounds.max_length)
    }
}

fn push_sentence(summary: &mut String, sentence: &str) {
    let sentence = sentence.trim();
    if sentence.is_empty() {
        return;
    }
    if !summary.is_empty() {
        summary.push(' ');
    }
    summary.push_str(sentence);
}

#[async_trait]
impl Summarizer for LeadSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        let summary = self.lead(text);
        if summary.is_empty() {
            return Err(SummarizeError::EmptyOutput);
        }
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "lead"
    }
}
