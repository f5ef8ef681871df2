//! URL handling module for Tune-Sieve
//!
//! This module resolves raw hrefs into normalized absolute URLs and sorts
//! them into audio targets and page candidates.

mod normalize;

pub use normalize::{is_skippable_link, normalize_link, normalize_url};

use url::Url;

/// Extension that marks a link as an audio target
pub const AUDIO_EXTENSION: &str = ".mp3";

/// What a normalized link points at, judged by its text alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Direct link to an audio file; collected, never crawled
    Audio,
    /// Anything else; may be probed and crawled if depth allows
    PageCandidate,
}

/// Classifies a normalized URL
///
/// # Examples
///
/// ```
/// use tune_sieve::url::{classify_link, LinkKind};
///
/// assert_eq!(classify_link("http://example.com/a.mp3"), LinkKind::Audio);
/// assert_eq!(classify_link("http://example.com/sub/"), LinkKind::PageCandidate);
/// ```
pub fn classify_link(url: &str) -> LinkKind {
    if url.ends_with(AUDIO_EXTENSION) {
        LinkKind::Audio
    } else {
        LinkKind::PageCandidate
    }
}

/// Returns true when the URL text alone says it is an HTML page
///
/// Matches `.html`, `.shtml` and `.xhtml` endings.
pub fn looks_like_html(url: &str) -> bool {
    url.ends_with("html")
}

/// Returns the last path segment of a URL, still percent-escaped
pub fn file_name_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("")
            .to_string(),
        Err(_) => url.rsplit('/').next().unwrap_or(url).to_string(),
    }
}
