//! Core data structures for job listings and API envelopes

use serde::{Deserialize, Serialize};

/// Placeholder for a field the heuristics could not recover
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder title when neither the heuristics nor the page title help
pub const DEFAULT_TITLE: &str = "Job Opening";

/// One detected job vacancy posting
///
/// Every field is always populated, either with extracted content or with
/// one of the sentinel values above. Constructed once per URL and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    /// Absolute URL of the posting page
    pub url: String,

    /// Display title
    pub title: String,

    /// Department name or "N/A"
    pub department: String,

    /// Closing date, verbatim, or "N/A"
    pub deadline: String,

    /// Exam date, verbatim, or "N/A"
    pub exam_info: String,

    /// Natural-language summary of the page
    pub summary: String,
}

/// Response for a free-text search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<JobListing>,
}

/// Response for the "all current jobs" listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobListing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JobListing {
        JobListing {
            url: "https://www.gazette.lk/2024/05/station-master.html".to_string(),
            title: "Station Master".to_string(),
            department: "Sri Lanka Railway Department".to_string(),
            deadline: "2024-05-10".to_string(),
            exam_info: NOT_AVAILABLE.to_string(),
            summary: "Applications are invited for the post of Station Master.".to_string(),
        }
    }

    #[test]
    fn test_listing_serializes_all_six_fields_as_strings() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 6);
        for key in ["url", "title", "department", "deadline", "exam_info", "summary"] {
            assert!(obj[key].is_string(), "{key} should be a string");
        }
    }

    #[test]
    fn test_search_response_shape() {
        let response = SearchResponse {
            query: "station master".to_string(),
            results: vec![sample()],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["query"], "station master");
        assert_eq!(value["results"][0]["exam_info"], "N/A");
    }

    #[test]
    fn test_jobs_response_empty_list() {
        let json = serde_json::to_string(&JobsResponse { jobs: vec![] }).unwrap();
        assert_eq!(json, r#"{"jobs":[]}"#);
    }
}
