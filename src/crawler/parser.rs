//! HTML link extraction
//!
//! The crawler only needs one thing from a fetched page: the raw `href`
//! values of its anchors. Resolution, filtering and classification happen
//! later, in the crawler and the `url` module.

use scraper::{Html, Selector};

/// Turns a fetched document into its raw anchor hrefs
///
/// Implementations return one entry per anchor element, in document order,
/// with `None` for anchors that carry no `href` at all. Values are returned
/// untouched; empty or unusable strings are the caller's problem.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, document: &str) -> Vec<Option<String>>;
}

/// `LinkExtractor` backed by the `scraper` HTML parser
#[derive(Debug, Clone, Default)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, document: &str) -> Vec<Option<String>> {
        let document = Html::parse_document(document);

        let Ok(anchor_selector) = Selector::parse("a") else {
            return Vec::new();
        };

        document
            .select(&anchor_selector)
            .map(|element| element.value().attr("href").map(str::to_string))
            .collect()
    }
}
