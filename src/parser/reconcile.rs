//! Title reconciliation
//!
//! The keyword scan often lands on a category word ("Vacancies") rather than
//! the posting's own title. Those generic results are replaced by the page
//! title.

use crate::models::DEFAULT_TITLE;

/// Heuristic titles considered too generic, lower-case
pub const GENERIC_TITLES: &[&str] = &["vacancies", "job vacancy", "vacancy", "job openings"];

/// Whether a parsed title is one of the known-generic values
pub fn is_generic_title(title: &str) -> bool {
    GENERIC_TITLES.contains(&title.to_lowercase().as_str())
}

/// Pick the final display title
pub fn reconcile_title(parsed_title: &str, page_title: Option<&str>) -> String {
    if is_generic_title(parsed_title) {
        page_title.unwrap_or(DEFAULT_TITLE).to_string()
    } else {
        parsed_title.to_string()
    }
}
