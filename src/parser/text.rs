//! Visible text and page title extraction
//!
//! Both functions are pure: the same markup always yields the same output.

use scraper::{ElementRef, Html};

use crate::parser::selectors::{HEADING, INVISIBLE_ELEMENTS, NOSCRIPT, TITLE};
use crate::utils::error::ExtractError;

/// Text and title derived from a single parse of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Visible text nodes, each trimmed, joined with single spaces
    pub text: String,

    /// Best-effort page title
    pub title: Option<String>,
}

impl PageContent {
    /// Parse markup once and derive both text and title
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::NoText` if the page has no visible text.
    pub fn from_html(html: &str) -> Result<Self, ExtractError> {
        let document = Html::parse_document(html);

        let text = visible_text(&document);
        if text.is_empty() {
            return Err(ExtractError::NoText);
        }

        Ok(Self {
            text,
            title: page_title(&document),
        })
    }
}

/// Strip markup and join visible text nodes with single spaces
///
/// Each node is trimmed at both ends; whitespace inside a node is kept.
pub fn extract_text(html: &str) -> String {
    visible_text(&Html::parse_document(html))
}

/// Page title with fallback to the first heading
///
/// Order: non-empty `<title>`, then the first `<h1>`/`<h2>` in document
/// order if its text is non-empty. A blank first heading ends the search.
pub fn extract_title(html: &str) -> Option<String> {
    page_title(&Html::parse_document(html))
}

fn visible_text(document: &Html) -> String {
    let mut chunks = Vec::new();
    collect_chunks(document, &mut chunks);
    chunks.join(" ")
}

/// Push each visible text node, trimmed at both ends, in document order
fn collect_chunks(document: &Html, chunks: &mut Vec<String>) {
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let mut in_noscript = false;
        let mut hidden = false;
        for ancestor in node.ancestors() {
            let Some(element) = ancestor.value().as_element() else {
                continue;
            };
            if INVISIBLE_ELEMENTS.contains(&element.name()) {
                hidden = true;
                break;
            }
            in_noscript |= element.name() == NOSCRIPT;
        }

        if hidden {
            continue;
        }

        // html5ever keeps <noscript> content as one raw text node
        if in_noscript {
            collect_chunks(&Html::parse_fragment(text), chunks);
            continue;
        }

        let chunk = text.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
    }
}

fn page_title(document: &Html) -> Option<String> {
    if let Some(title) = document.select(&TITLE).next().and_then(element_text) {
        return Some(title);
    }

    document.select(&HEADING).next().and_then(element_text)
}

fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_joins_nodes_with_spaces() {
        let html = "<html><body><p>Closing Date:<b>2024-05-10</b></p><div>  Apply now </div></body></html>";
        assert_eq!(extract_text(html), "Closing Date: 2024-05-10 Apply now");
    }

    #[test]
    fn test_extract_text_keeps_whitespace_inside_a_node() {
        assert_eq!(extract_text("<p>Station\n   Master</p>"), "Station\n   Master");
        assert_eq!(extract_text("<p>  Apply  now  </p>"), "Apply  now");
    }

    #[test]
    fn test_noscript_content_is_parsed_as_markup() {
        let html = r#"<html><head><title>T</title></head><body><p>Clerk post</p>
            <noscript><img src="https://www.gazette.lk/wp-content/uploads/exam-notice.jpg" alt="x"></noscript>
            <noscript><p>Enable <b>JavaScript</b></p></noscript></body></html>"#;
        assert_eq!(extract_text(html), "T Clerk post Enable JavaScript");
    }

    #[test]
    fn test_extract_text_skips_scripts_and_styles() {
        let html = r#"<html><head><style>p { color: red }</style>
            <script>var x = "hidden";</script></head>
            <body><p>Visible</p><template><p>not rendered</p></template></body></html>"#;
        assert_eq!(extract_text(html), "Visible");
    }

    #[test]
    fn test_extract_text_includes_title_text() {
        let html = "<html><head><title>Gazette</title></head><body><p>Body</p></body></html>";
        assert_eq!(extract_text(html), "Gazette Body");
    }

    #[test]
    fn test_extract_text_empty_page() {
        assert_eq!(extract_text("<html><body>   </body></html>"), "");
    }

    #[test]
    fn test_title_tag_wins_over_headings() {
        let html = "<html><head><title> Station Master Vacancy </title></head><body><h1>Other</h1></body></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Station Master Vacancy"));
    }

    #[test]
    fn test_blank_title_falls_back_to_heading() {
        let html = "<html><head><title>   </title></head><body><h2>Clerk Post</h2><h1>Later</h1></body></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Clerk Post"));
    }

    #[test]
    fn test_title_trimmed_but_not_collapsed() {
        let html = "<html><head><title>\n  Clerk -  Ministry \n</title></head></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Clerk -  Ministry"));
    }

    #[test]
    fn test_blank_first_heading_yields_none() {
        let html = "<html><body><h1> </h1><h2>Not reached</h2></body></html>";
        assert_eq!(extract_title(html), None);
    }

    #[test]
    fn test_no_title_no_heading() {
        assert_eq!(extract_title("<html><body><p>Plain</p></body></html>"), None);
    }

    #[test]
    fn test_page_content_rejects_textless_page() {
        let err = PageContent::from_html("<html><body><script>x()</script></body></html>");
        assert_eq!(err, Err(ExtractError::NoText));
    }

    #[test]
    fn test_page_content_from_html() {
        let html = "<html><head><title>Vacancies</title></head><body><p>Exam Date: 01.06.2024</p></body></html>";
        let content = PageContent::from_html(html).unwrap();
        assert_eq!(content.title.as_deref(), Some("Vacancies"));
        assert_eq!(content.text, "Vacancies Exam Date: 01.06.2024");
    }
}
