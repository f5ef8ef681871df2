//! Tune-Sieve: a genre-sorted MP3 link harvester
//!
//! This crate crawls a list of seed sites to a bounded link depth, collects
//! direct links to MP3 files, reads the leading bytes of each file to decode
//! its genre and title, and produces a playlist report grouped by genre.

pub mod config;
pub mod crawler;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for Tune-Sieve operations
///
/// Per-URL failures never surface here; they are logged and the URL is
/// skipped. Only problems that prevent a report from being assembled at all
/// are returned.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Site list error: {0}")]
    SiteList(#[from] SiteListError),

    #[error("Failed to create scratch directory: {0}")]
    Scratch(std::io::Error),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while reading an XML site list
#[derive(Debug, Error)]
pub enum SiteListError {
    #[error("Failed to read site list: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed site list: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Cannot resolve '{link}' against '{base}': {message}")]
    Join {
        base: String,
        link: String,
        message: String,
    },
}

/// Errors raised while rendering or writing the playlist report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode report: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for Tune-Sieve operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, ConcurrencyMode};
pub use metadata::TrackRecord;
pub use output::GenreReport;
pub use pipeline::Pipeline;
pub use url::{classify_link, normalize_link, LinkKind};
