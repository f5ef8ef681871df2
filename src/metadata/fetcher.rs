//! Partial-content track fetching
//!
//! Every batch gets one scratch directory. Each track's leading bytes are
//! written to their own temporary file inside it, decoded, and the file is
//! removed when that track is done. The directory is removed once, after
//! every track of the batch has finished.

use crate::config::ConcurrencyMode;
use crate::crawler::HttpFetcher;
use crate::metadata::decoder::{AudioTags, DecodeError, TagDecoder};
use crate::metadata::TrackRecord;
use crate::output::RunStatistics;
use crate::url::file_name_of;
use crate::HarvestError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Downloads audio file prefixes and turns them into `TrackRecord`s
#[derive(Clone)]
pub struct MetadataFetcher {
    fetcher: HttpFetcher,
    decoder: Arc<dyn TagDecoder>,
    range_bytes: u64,
    stats: Arc<RunStatistics>,
}

impl MetadataFetcher {
    /// Creates a fetcher that reads `range_bytes` leading bytes per file
    pub fn new(
        fetcher: HttpFetcher,
        decoder: Arc<dyn TagDecoder>,
        range_bytes: u64,
        stats: Arc<RunStatistics>,
    ) -> Self {
        Self {
            fetcher,
            decoder,
            range_bytes,
            stats,
        }
    }

    /// Fetches every URL and returns the records in completion order
    ///
    /// URLs whose download fails are dropped. The only error is failing to
    /// create the scratch directory, since no track can be read without it.
    pub async fn fetch_all(
        &self,
        urls: Vec<String>,
        mode: ConcurrencyMode,
    ) -> Result<Vec<TrackRecord>, HarvestError> {
        let scratch = tempfile::Builder::new()
            .prefix("tune-sieve-")
            .suffix("mp3")
            .tempdir()
            .map_err(HarvestError::Scratch)?;
        let dir = scratch.path().to_path_buf();
        tracing::debug!("Scratch directory {}", dir.display());

        let mut records = Vec::with_capacity(urls.len());
        match mode {
            ConcurrencyMode::Concurrent => {
                let mut tasks = JoinSet::new();
                for url in urls {
                    let this = self.clone();
                    let dir = dir.clone();
                    tasks.spawn(async move { this.fetch_track(&url, &dir).await });
                }

                while let Some(joined) = tasks.join_next().await {
                    match joined {
                        Ok(Some(record)) => records.push(record),
                        Ok(None) => {}
                        Err(e) => tracing::error!("Track task failed: {}", e),
                    }
                }
            }
            ConcurrencyMode::Sequential => {
                for url in urls {
                    if let Some(record) = self.fetch_track(&url, &dir).await {
                        records.push(record);
                    }
                }
            }
        }

        if let Err(e) = scratch.close() {
            tracing::warn!("Failed to remove scratch directory {}: {}", dir.display(), e);
        }

        Ok(records)
    }

    /// Fetches one track; `None` if its bytes could not be retrieved
    ///
    /// A tag that cannot be decoded is not a failure: the record is built
    /// with sentinel genre and title instead.
    pub async fn fetch_track(&self, url: &str, dir: &Path) -> Option<TrackRecord> {
        let filename = file_name_of(url);
        tracing::info!("Load {}", filename);

        let bytes = match self.fetcher.fetch_prefix(url, self.range_bytes).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.stats.record_dropped_track();
                tracing::warn!("Dropping track: {}", e);
                return None;
            }
        };

        let decoder = Arc::clone(&self.decoder);
        let dir = dir.to_path_buf();
        let decoded =
            tokio::task::spawn_blocking(move || decode_prefix(decoder.as_ref(), &dir, &bytes))
                .await;

        let tags = match decoded {
            Ok(Ok(Ok(tags))) => tags,
            Ok(Ok(Err(e))) => {
                tracing::debug!("Undecodable tag for {}: {}", url, e);
                AudioTags::default()
            }
            Ok(Err(e)) => {
                self.stats.record_dropped_track();
                tracing::warn!("Dropping track {}: scratch file error: {}", url, e);
                return None;
            }
            Err(e) => {
                self.stats.record_dropped_track();
                tracing::error!("Decode task for {} failed: {}", url, e);
                return None;
            }
        };

        self.stats.record_track();
        Some(TrackRecord::from_tags(filename, url, &tags))
    }
}

/// Writes the prefix to its own scratch file and decodes it
///
/// The scratch file is deleted when this returns.
fn decode_prefix(
    decoder: &dyn TagDecoder,
    dir: &Path,
    bytes: &[u8],
) -> std::io::Result<Result<AudioTags, DecodeError>> {
    let mut file = tempfile::Builder::new()
        .prefix("track-")
        .suffix(".mp3")
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(decoder.decode(file.path()))
}
