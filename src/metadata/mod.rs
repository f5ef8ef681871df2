//! Metadata module for discovered audio files
//!
//! This module turns audio links into `TrackRecord`s:
//! - Ranged download of each file's leading bytes
//! - Tag decoding from a scratch copy of those bytes
//! - Sentinel values for tags that are missing

mod decoder;
mod fetcher;

pub use decoder::{AudioTags, DecodeError, Id3TagDecoder, TagDecoder};
pub use fetcher::MetadataFetcher;

/// Genre reported for tracks whose tag has none
pub const UNDEFINED_GENRE: &str = "Undefined";

/// Title reported for tracks whose tag has none
pub const NO_TITLE: &str = "No-title";

/// One reported track
///
/// `genre` and `title` are never empty: missing values are replaced by
/// [`UNDEFINED_GENRE`] and [`NO_TITLE`] when the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackRecord {
    filename: String,
    title: String,
    genre: String,
    source_url: String,
}

impl TrackRecord {
    /// Builds a record, substituting sentinels for absent or blank fields
    ///
    /// # Examples
    ///
    /// ```
    /// use tune_sieve::TrackRecord;
    ///
    /// let track = TrackRecord::new("a.mp3", "http://example.com/a.mp3", Some("Jazz"), None);
    /// assert_eq!(track.genre(), "Jazz");
    /// assert_eq!(track.title(), "No-title");
    /// ```
    pub fn new(
        filename: impl Into<String>,
        source_url: impl Into<String>,
        genre: Option<&str>,
        title: Option<&str>,
    ) -> Self {
        Self {
            filename: filename.into(),
            title: present(title).unwrap_or(NO_TITLE).to_string(),
            genre: present(genre).unwrap_or(UNDEFINED_GENRE).to_string(),
            source_url: source_url.into(),
        }
    }

    /// Builds a record from decoded tags
    pub fn from_tags(
        filename: impl Into<String>,
        source_url: impl Into<String>,
        tags: &AudioTags,
    ) -> Self {
        Self::new(
            filename,
            source_url,
            tags.genre.as_deref(),
            tags.title.as_deref(),
        )
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
