//! HTML parsing and job field extraction
//!
//! - [`text`] - visible text and page title from raw markup
//! - [`fields`] - keyword/regex heuristics over the normalized text
//! - [`reconcile`] - choose between the heuristic title and the page title

pub mod fields;
pub mod reconcile;
pub mod selectors;
pub mod text;

pub use fields::{parse_job_fields, JobFields};
pub use reconcile::{is_generic_title, reconcile_title};
pub use text::{extract_text, extract_title, PageContent};
