//! Crawler module for audio link discovery
//!
//! This module contains the crawl stage of the pipeline:
//! - HTTP and local-file fetching behind a shared request limit
//! - Anchor href extraction from fetched pages
//! - Depth-bounded, cycle-free traversal that collects audio links

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{CrawlTask, Crawler};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, Probe};
pub use parser::{HtmlLinkExtractor, LinkExtractor};
