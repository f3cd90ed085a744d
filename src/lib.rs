//! gazette-jobs - Job vacancy finder for gazette.lk
//!
//! Finds job postings on the gazette site, either through its search page
//! or its jobs category page, and turns each posting into a structured
//! [`JobListing`] with a short summary.
//!
//! # Architecture
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Index sources, fetching and per-URL processing
//! - [`parser`] - Visible text, title and field heuristics
//! - [`summarizer`] - Pluggable summarization backends
//! - [`models`] - Listings and response envelopes
//! - [`server`] - JSON HTTP API
//! - [`utils`] - Common utilities and stage error types
//!
//! # Example
//!
//! ```no_run
//! use gazette_jobs::config::Config;
//! use gazette_jobs::crawler::GazetteCrawler;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let crawler = GazetteCrawler::from_config(&config)?;
//!     let response = crawler.search_jobs("station master").await?;
//!     println!("{} results", response.results.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod server;
pub mod summarizer;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{GazetteCrawler, PageFetcher};
    pub use crate::error::{CategorizedError, Error, ErrorCategory, Result};
    pub use crate::models::{JobListing, JobsResponse, SearchResponse};
    pub use crate::summarizer::Summarizer;
}

pub use models::{JobListing, JobsResponse, SearchResponse};
