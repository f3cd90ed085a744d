//! Per-URL processing: fetch, extract, summarize
//!
//! Each candidate URL is fetched once. Its markup is parsed once for both
//! text and title, the field heuristics run over the text, and a prefix of
//! the text is summarized. Any failure skips that URL only.

use futures::stream::{self, StreamExt};
use std::fmt;
use std::sync::Arc;

use crate::crawler::fetcher::PageFetcher;
use crate::models::JobListing;
use crate::parser::{parse_job_fields, reconcile_title, PageContent};
use crate::summarizer::Summarizer;
use crate::utils::truncate_chars;

/// Why a candidate URL produced no listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Page could not be retrieved
    FetchFailed,

    /// Page had no visible text
    NoText,

    /// Summarizer failed or returned nothing
    SummaryFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::FetchFailed => "fetch failed",
            Self::NoText => "no visible text",
            Self::SummaryFailed => "summary failed",
        };
        f.write_str(reason)
    }
}

/// Result of processing one candidate URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlOutcome {
    Emitted(JobListing),
    Skipped(SkipReason),
}

/// Turns candidate URLs into job listings
pub struct ListingCollector {
    fetcher: Arc<dyn PageFetcher>,
    summarizer: Arc<dyn Summarizer>,
    max_input_chars: usize,
    max_concurrent: usize,
}

impl ListingCollector {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        summarizer: Arc<dyn Summarizer>,
        max_input_chars: usize,
        max_concurrent: usize,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            max_input_chars,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Process a single URL
    pub async fn process_url(&self, url: &str) -> UrlOutcome {
        let Some(html) = self.fetcher.fetch(url).await else {
            return UrlOutcome::Skipped(SkipReason::FetchFailed);
        };

        let page = match PageContent::from_html(&html) {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "No usable text");
                return UrlOutcome::Skipped(SkipReason::NoText);
            }
        };

        let fields = parse_job_fields(&page.text);
        let title = reconcile_title(&fields.title, page.title.as_deref());

        let input = truncate_chars(&page.text, self.max_input_chars);
        let summary = match self.summarizer.summarize(input).await {
            Ok(summary) if !summary.trim().is_empty() => summary,
            Ok(_) => {
                tracing::warn!(url = %url, backend = self.summarizer.name(), "Empty summary");
                return UrlOutcome::Skipped(SkipReason::SummaryFailed);
            }
            Err(e) => {
                tracing::warn!(
                    url = %url,
                    backend = self.summarizer.name(),
                    error = %e,
                    "Summarization failed"
                );
                return UrlOutcome::Skipped(SkipReason::SummaryFailed);
            }
        };

        UrlOutcome::Emitted(JobListing {
            url: url.to_string(),
            title,
            department: fields.department,
            deadline: fields.deadline,
            exam_info: fields.exam_info,
            summary,
        })
    }

    /// Process URLs and return emitted listings in input order
    ///
    /// Up to `max_concurrent` URLs are in flight at once; output order does
    /// not depend on completion order.
    pub async fn collect(&self, urls: &[String]) -> Vec<JobListing> {
        let outcomes: Vec<UrlOutcome> = stream::iter(urls.iter().cloned())
            .map(|url| async move { self.process_url(&url).await })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut skipped = 0usize;
        let listings: Vec<JobListing> = outcomes
            .into_iter()
            .zip(urls)
            .filter_map(|(outcome, url)| match outcome {
                UrlOutcome::Emitted(listing) => Some(listing),
                UrlOutcome::Skipped(reason) => {
                    tracing::debug!(url = %url, reason = %reason, "Skipped URL");
                    skipped += 1;
                    None
                }
            })
            .collect();

        tracing::info!(
            candidates = urls.len(),
            emitted = listings.len(),
            skipped,
            "Collected listings"
        );

        listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;
    use crate::utils::error::{FetchError, SummarizeError};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StaticPages(HashMap<String, String>);

    #[async_trait]
    impl PageFetcher for StaticPages {
        async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
            self.0.get(url).cloned().ok_or(FetchError::Status(404))
        }
    }

    /// Echoes the length of its input so truncation is observable
    struct LengthSummarizer;

    #[async_trait]
    impl Summarizer for LengthSummarizer {
        async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
            Ok(format!("{} chars", text.chars().count()))
        }

        fn name(&self) -> &'static str {
            "length"
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String, SummarizeError> {
            Err(SummarizeError::Request("model unavailable".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn emitted(outcome: UrlOutcome) -> JobListing {
        match outcome {
            UrlOutcome::Emitted(listing) => listing,
            UrlOutcome::Skipped(reason) => panic!("expected a listing, skipped: {reason}"),
        }
    }

    fn pages(entries: &[(&str, &str)]) -> Arc<dyn PageFetcher> {
        Arc::new(StaticPages(
            entries
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
        ))
    }

    #[tokio::test]
    async fn test_process_url_builds_listing() {
        let html = "<html><head><title>Vacancies</title></head><body>\
            <p>Vacancies - Station Master</p>\
            <p>Sri Lanka Railway. Closing date: 2024-05-10</p></body></html>";
        let collector = ListingCollector::new(
            pages(&[("https://x/1", html)]),
            Arc::new(LengthSummarizer),
            1024,
            1,
        );

        let listing = emitted(collector.process_url("https://x/1").await);
        assert_eq!(listing.url, "https://x/1");
        assert_eq!(listing.department, "Sri Lanka Railway Department");
        assert_eq!(listing.deadline, "2024-05-10");
        assert_eq!(listing.exam_info, NOT_AVAILABLE);
        assert!(!listing.title.is_empty());
    }

    #[tokio::test]
    async fn test_summary_input_is_truncated() {
        let body = "word ".repeat(500);
        let html = format!("<html><body><p>{body}</p></body></html>");
        let collector = ListingCollector::new(
            pages(&[("https://x/long", html.as_str())]),
            Arc::new(LengthSummarizer),
            1024,
            1,
        );

        let listing = emitted(collector.process_url("https://x/long").await);
        assert_eq!(listing.summary, "1024 chars");
    }

    #[tokio::test]
    async fn test_skip_reasons() {
        let collector = ListingCollector::new(
            pages(&[("https://x/blank", "<html><body>  </body></html>")]),
            Arc::new(LengthSummarizer),
            1024,
            1,
        );
        assert_eq!(
            collector.process_url("https://x/missing").await,
            UrlOutcome::Skipped(SkipReason::FetchFailed)
        );
        assert_eq!(
            collector.process_url("https://x/blank").await,
            UrlOutcome::Skipped(SkipReason::NoText)
        );

        let failing = ListingCollector::new(
            pages(&[("https://x/ok", "<p>Clerk vacancy</p>")]),
            Arc::new(FailingSummarizer),
            1024,
            1,
        );
        assert_eq!(
            failing.process_url("https://x/ok").await,
            UrlOutcome::Skipped(SkipReason::SummaryFailed)
        );
    }

    #[tokio::test]
    async fn test_collect_preserves_order_and_skips_failures() {
        let fetcher = pages(&[
            ("https://x/a", "<p>Post A</p>"),
            ("https://x/c", "<p>Post C</p>"),
            ("https://x/d", "<p>Post D</p>"),
        ]);
        let urls: Vec<String> = ["https://x/a", "https://x/b", "https://x/c", "https://x/d"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        for concurrency in [1, 4] {
            let collector =
                ListingCollector::new(fetcher.clone(), Arc::new(LengthSummarizer), 1024, concurrency);
            let listings = collector.collect(&urls).await;
            let got: Vec<&str> = listings.iter().map(|l| l.url.as_str()).collect();
            assert_eq!(got, vec!["https://x/a", "https://x/c", "https://x/d"]);
        }
    }

    #[tokio::test]
    async fn test_collect_runs_on_spawned_task() {
        let collector = Arc::new(ListingCollector::new(
            pages(&[("https://x/a", "<p>Post A</p>"), ("https://x/b", "<p>Post B</p>")]),
            Arc::new(LengthSummarizer),
            1024,
            2,
        ));
        let urls = vec!["https://x/a".to_string(), "https://x/b".to_string()];

        // Handlers and spawned tasks need a Send future
        let handle = tokio::spawn({
            let collector = collector.clone();
            async move { collector.collect(&urls).await }
        });

        let listings = handle.await.unwrap();
        assert_eq!(listings.len(), 2);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::FetchFailed.to_string(), "fetch failed");
        assert_eq!(SkipReason::SummaryFailed.to_string(), "summary failed");
    }
}
