//! CSS selectors used when reading posting pages

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    /// Document `<title>`
    pub static ref TITLE: Selector = parse_selector!("title");

    /// First top-level heading, either level, in document order
    pub static ref HEADING: Selector = parse_selector!("h1, h2");
}

/// Elements whose text content is not rendered
pub const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Fallback markup container; its raw text is re-parsed as HTML
pub const NOSCRIPT: &str = "noscript";
