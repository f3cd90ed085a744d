//! Index pages that yield candidate posting URLs
//!
//! - [`SearchIndexSource`] - the site's `?s=` search results page
//! - [`CategoryIndexSource`] - the fixed jobs category page
//!
//! An index page that fails to fetch yields an empty list, never an error.

use scraper::{Html, Selector};
use std::sync::Arc;
use url::Url;

use crate::config::SiteConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::error::{Error, Result};
use crate::utils::error::ExtractError;
use crate::utils::resolve_url;

/// Parse the configured link selector
fn parse_link_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        Error::from(ExtractError::Selector {
            selector: selector.to_string(),
            message: format!("{e:?}"),
        })
    })
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    Url::parse(base_url).map_err(|e| Error::config(format!("Invalid base_url '{base_url}': {e}")))
}

/// `href` values of all elements matching `selector`, in document order
///
/// Elements without an `href` are ignored.
pub fn extract_links(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// Candidate URLs from the search results page
pub struct SearchIndexSource {
    fetcher: Arc<dyn PageFetcher>,
    base_url: Url,
    selector: Selector,
    limit: usize,
}

impl SearchIndexSource {
    pub fn new(fetcher: Arc<dyn PageFetcher>, site: &SiteConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            base_url: parse_base_url(&site.base_url)?,
            selector: parse_link_selector(&site.result_selector)?,
            limit: site.search_limit,
        })
    }

    /// Search page URL for `query`; spaces are sent as `+`
    pub fn search_url(&self, query: &str) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().clear().append_pair("s", query);
        url.to_string()
    }

    /// First `search_limit` result links, in page order, not deduplicated
    pub async fn find(&self, query: &str) -> Vec<String> {
        let search_url = self.search_url(query);

        let Some(html) = self.fetcher.fetch(&search_url).await else {
            tracing::warn!(query = %query, "Search page unavailable");
            return Vec::new();
        };

        let links: Vec<String> = extract_links(&html, &self.selector)
            .into_iter()
            .take(self.limit)
            .collect();

        tracing::debug!(query = %query, count = links.len(), "Collected search result links");
        links
    }
}

/// Candidate URLs from the jobs category page
pub struct CategoryIndexSource {
    fetcher: Arc<dyn PageFetcher>,
    base_url: Url,
    category_url: String,
    selector: Selector,
    limit: usize,
}

impl CategoryIndexSource {
    pub fn new(fetcher: Arc<dyn PageFetcher>, site: &SiteConfig) -> Result<Self> {
        let base_url = parse_base_url(&site.base_url)?;
        let category_url = base_url
            .join(&site.category_path)
            .map_err(|e| {
                Error::config(format!("Invalid category_path '{}': {e}", site.category_path))
            })?
            .to_string();

        Ok(Self {
            fetcher,
            base_url,
            category_url,
            selector: parse_link_selector(&site.result_selector)?,
            limit: site.category_limit,
        })
    }

    pub fn category_url(&self) -> &str {
        &self.category_url
    }

    /// First `category_limit` links, resolved to absolute URLs
    pub async fn find(&self) -> Vec<String> {
        let Some(html) = self.fetcher.fetch(&self.category_url).await else {
            tracing::warn!(url = %self.category_url, "Category page unavailable");
            return Vec::new();
        };

        let links: Vec<String> = extract_links(&html, &self.selector)
            .iter()
            .filter_map(|href| resolve_url(&self.base_url, href))
            .take(self.limit)
            .collect();

        tracing::debug!(count = links.len(), "Collected category links");
        links
    }
}
