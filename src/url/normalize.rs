use crate::{UrlError, UrlResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Prefixes of hrefs that never point at a fetchable resource
const SKIPPED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Bytes escaped in a normalized path: everything but unreserved characters,
/// `/` and `%` (so existing `%XX` sequences pass through)
const PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b'%');

/// Resolves a raw link against the page it was found on
///
/// # Normalization Steps
///
/// 1. Join `link` onto `base` using standard URL resolution (relative paths,
///    protocol-relative links, `..` segments)
/// 2. `file` URLs are returned exactly as resolved
/// 3. Any other scheme is rebuilt as `scheme://host[:port]` followed by the
///    percent-escaped path; query, fragment and credentials are dropped
///
/// Escaping keeps existing `%XX` sequences, so two links that differ only in
/// how their path is encoded produce the same string.
///
/// # Examples
///
/// ```
/// use tune_sieve::url::normalize_link;
///
/// let url = normalize_link("http://example.com/music/", "../songs/my song.mp3?x=1").unwrap();
/// assert_eq!(url, "http://example.com/songs/my%20song.mp3");
/// ```
pub fn normalize_link(base: &str, link: &str) -> UrlResult<String> {
    let base_url = Url::parse(base).map_err(|e| UrlError::Parse(format!("{}: {}", base, e)))?;

    let resolved = base_url.join(link.trim()).map_err(|e| UrlError::Join {
        base: base.to_string(),
        link: link.to_string(),
        message: e.to_string(),
    })?;

    Ok(canonical_form(&resolved))
}

/// Normalizes an absolute URL such as a seed
///
/// Produces the same string `normalize_link` would for a link pointing at
/// this URL, so a seed and a link back to it share one visited-set entry.
///
/// # Examples
///
/// ```
/// use tune_sieve::url::normalize_url;
///
/// assert_eq!(normalize_url(" http://example.com ").unwrap(), "http://example.com/");
/// ```
pub fn normalize_url(url: &str) -> UrlResult<String> {
    let parsed = Url::parse(url.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;
    Ok(canonical_form(&parsed))
}

/// `scheme://host[:port]/escaped/path` for network URLs, `file` URLs untouched
fn canonical_form(url: &Url) -> String {
    if url.scheme() == "file" {
        return url.to_string();
    }

    let mut normalized = format!("{}://", url.scheme());
    if let Some(host) = url.host_str() {
        normalized.push_str(host);
    }
    if let Some(port) = url.port() {
        normalized.push(':');
        normalized.push_str(&port.to_string());
    }
    normalized.extend(utf8_percent_encode(url.path(), PATH_SET));
    normalized
}

/// Returns true for hrefs the crawler should not even try to resolve
///
/// Empty values, same-page fragments, and script/mail/phone/data links.
pub fn is_skippable_link(link: &str) -> bool {
    let link = link.trim();
    if link.is_empty() || link.starts_with('#') {
        return true;
    }

    let lowered = link.to_ascii_lowercase();
    SKIPPED_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}
