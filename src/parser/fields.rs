//! Heuristic field extraction over normalized page text
//!
//! Four independent scans, each first-match-wins. Unmatched fields fall back
//! to sentinels, so parsing never fails.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{DEFAULT_TITLE, NOT_AVAILABLE};

/// Phrases that mark a posting title, in alternation order
pub const TITLE_KEYWORDS: &[&str] = &[
    "Station Master",
    "Job Vacancy",
    "Vacancies",
    "Recruitment",
    "Exam",
];

/// Literal trigger phrase → department it implies
///
/// Matched case-sensitively against the page text.
pub const DEPARTMENT_AFFILIATIONS: &[(&str, &str)] =
    &[("Sri Lanka Railway", "Sri Lanka Railway Department")];

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = TITLE_KEYWORDS
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)({alternation})")).unwrap()
});

static DEADLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)closing date[:\s]*([\d\-/.]+)").unwrap());

static EXAM_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)exam date[:\s]*([\d\-/.]+)").unwrap());

/// Fields recovered from one page's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFields {
    pub title: String,
    pub department: String,
    pub deadline: String,
    pub exam_info: String,
}

/// Run all four scans over `text`
pub fn parse_job_fields(text: &str) -> JobFields {
    JobFields {
        title: find_title(text).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        department: find_department(text).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        deadline: capture_first(&DEADLINE_REGEX, text).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        exam_info: capture_first(&EXAM_DATE_REGEX, text)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

/// Leftmost title keyword, with the casing it has in the text
fn find_title(text: &str) -> Option<String> {
    TITLE_REGEX.find(text).map(|m| m.as_str().to_string())
}

fn find_department(text: &str) -> Option<String> {
    DEPARTMENT_AFFILIATIONS
        .iter()
        .find(|(trigger, _)| text.contains(trigger))
        .map(|(_, department)| (*department).to_string())
}

fn capture_first(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
