//! Gazette job crawling
//!
//! [`GazetteCrawler`] wires the two index sources to the per-URL collector.
//! Each call is stateless: nothing is cached between requests.

pub mod collector;
pub mod fetcher;
pub mod index;

pub use collector::{ListingCollector, SkipReason, UrlOutcome};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use index::{CategoryIndexSource, SearchIndexSource};

use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{JobsResponse, SearchResponse};
use crate::summarizer::{self, Summarizer};

/// Entry point for query search and category listing
pub struct GazetteCrawler {
    search: SearchIndexSource,
    category: CategoryIndexSource,
    collector: ListingCollector,
}

impl GazetteCrawler {
    /// Build a crawler with an explicit fetcher and summarizer
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            search: SearchIndexSource::new(fetcher.clone(), &config.site)?,
            category: CategoryIndexSource::new(fetcher.clone(), &config.site)?,
            collector: ListingCollector::new(
                fetcher,
                summarizer,
                config.summarizer.max_input_chars,
                config.crawler.max_concurrent_requests,
            ),
        })
    }

    /// Build a crawler with the HTTP fetcher and the configured summarizer
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.crawler)
            .map_err(|e| Error::with_source("Failed to create HTTP fetcher", e))?;
        let summarizer = summarizer::from_config(&config.summarizer)?;

        tracing::info!(backend = summarizer.name(), "Crawler initialized");

        Self::new(config, Arc::new(fetcher), summarizer)
    }

    /// Search postings matching `query`
    ///
    /// The query is searched and echoed exactly as given.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingQuery` for an empty or whitespace-only query.
    /// No page is fetched in that case. Per-URL failures never surface here.
    pub async fn search_jobs(&self, query: &str) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(Error::MissingQuery);
        }

        tracing::info!(query = %query, "Searching job postings");

        let urls = self.search.find(query).await;
        let results = self.collector.collect(&urls).await;

        Ok(SearchResponse {
            query: query.to_string(),
            results,
        })
    }

    /// List current postings from the jobs category page
    pub async fn all_jobs(&self) -> JobsResponse {
        tracing::info!("Listing current job postings");

        let urls = self.category.find().await;
        let jobs = self.collector.collect(&urls).await;

        JobsResponse { jobs }
    }
}
