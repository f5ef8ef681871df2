//! Audio tag decoding
//!
//! Only the first few kilobytes of each file are downloaded, so decoders must
//! cope with a file that stops in the middle of its tag or right after it.

use id3::TagLike;
use std::path::Path;
use thiserror::Error;

/// Genre and title as found in a file's tag; `None` when the field is absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioTags {
    pub genre: Option<String>,
    pub title: Option<String>,
}

/// Errors raised while reading a tag
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read tag from {path}: {message}")]
    Tag { path: String, message: String },
}

/// Reads genre and title from a file holding (at least) an audio file prefix
pub trait TagDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<AudioTags, DecodeError>;
}

/// `TagDecoder` for ID3v2 tags, backed by the `id3` crate
///
/// A missing tag decodes to empty `AudioTags`. A tag cut short by the
/// partial download still yields whatever frames were read before the cut.
/// Numeric genres such as `(17)` are mapped to their names.
#[derive(Debug, Clone, Default)]
pub struct Id3TagDecoder;

impl Id3TagDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl TagDecoder for Id3TagDecoder {
    fn decode(&self, path: &Path) -> Result<AudioTags, DecodeError> {
        match id3::Tag::read_from_path(path) {
            Ok(tag) => Ok(tags_from(&tag)),
            Err(id3::Error {
                kind: id3::ErrorKind::NoTag,
                ..
            }) => Ok(AudioTags::default()),
            Err(id3::Error {
                partial_tag: Some(tag),
                description,
                ..
            }) => {
                tracing::debug!(
                    "Using partial tag from {}: {}",
                    path.display(),
                    description
                );
                Ok(tags_from(&tag))
            }
            Err(e) => Err(DecodeError::Tag {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

fn tags_from(tag: &id3::Tag) -> AudioTags {
    AudioTags {
        genre: tag.genre_parsed().map(|genre| genre.into_owned()),
        title: tag.title().map(str::to_string),
    }
}
