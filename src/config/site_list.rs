//! XML site list reader
//!
//! A site list is a small XML document whose root element holds one `<site>`
//! child per seed URL:
//!
//! ```xml
//! <sites>
//!     <site>https://example.com/music/</site>
//!     <site>https://radio.example.org/archive.html</site>
//! </sites>
//! ```

use crate::SiteListError;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::path::Path;

/// Element name that carries a seed URL
const SITE_ELEMENT: &[u8] = b"site";

/// Reads a site list file and returns its seed URLs in document order
pub fn load_site_list(path: &Path) -> Result<Vec<String>, SiteListError> {
    let content = std::fs::read_to_string(path)?;
    let sites = parse_site_list(&content)?;
    tracing::debug!("Read {} sites from {}", sites.len(), path.display());
    Ok(sites)
}

/// Parses site list XML
///
/// Only `<site>` elements that are direct children of the root count. Their
/// text is trimmed; empty entries are skipped.
pub fn parse_site_list(xml: &str) -> Result<Vec<String>, SiteListError> {
    let mut reader = Reader::from_str(xml);
    let mut sites = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                depth += 1;
                if depth == 2 && element.name().as_ref() == SITE_ELEMENT {
                    current = Some(String::new());
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some(text) = current.take() {
                        let text = text.trim();
                        if !text.is_empty() {
                            sites.push(text.to_string());
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(text) => {
                if let Some(buffer) = current.as_mut() {
                    buffer.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(buffer) = current.as_mut() {
                    buffer.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(sites)
}
