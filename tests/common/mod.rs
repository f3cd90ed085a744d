//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use gazette_jobs::crawler::PageFetcher;
use gazette_jobs::summarizer::Summarizer;
use gazette_jobs::utils::error::{FetchError, SummarizeError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory fetcher that serves fixed pages and counts every call
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for MapFetcher {
    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }
        self.pages.get(url).cloned().ok_or(FetchError::Status(404))
    }
}

/// Summarizer that returns the first few words of its input
pub struct FirstWordsSummarizer;

#[async_trait]
impl Summarizer for FirstWordsSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let summary = text.split_whitespace().take(5).collect::<Vec<_>>().join(" ");
        if summary.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "first-words"
    }
}

/// Index page with one `h2.entry-title` link per href
pub fn index_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(
                r#"<article><h2 class="entry-title"><a href="{href}">Post {i}</a></h2><p>excerpt</p></article>"#
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html><html><head><title>Search</title></head><body>
<nav><a href="/about">About</a></nav>{items}</body></html>"#
    )
}

/// Posting page with a generic `<title>` and a keyword-led body
pub fn posting_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title><script>var tracking = "ignore me";</script></head>
<body>
<h1>{title}</h1>
<div class="entry-content"><p>{body}</p></div>
</body>
</html>"#
    )
}
