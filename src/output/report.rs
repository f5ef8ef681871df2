//! Genre aggregation
//!
//! Buckets appear in the order their genre was first seen; tracks inside a
//! bucket keep the order they arrived in. Since tracks arrive in fetch
//! completion order, only bucket membership is stable across runs.

use crate::metadata::TrackRecord;
use std::collections::HashMap;

/// All tracks that share one genre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreBucket {
    name: String,
    tracks: Vec<TrackRecord>,
}

impl GenreBucket {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }
}

/// Tracks grouped by genre, in first-seen genre order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreReport {
    buckets: Vec<GenreBucket>,
}

impl GenreReport {
    /// Buckets in first-seen order
    pub fn genres(&self) -> &[GenreBucket] {
        &self.buckets
    }

    /// Looks up a bucket by genre name
    pub fn genre(&self, name: &str) -> Option<&GenreBucket> {
        self.buckets.iter().find(|bucket| bucket.name == name)
    }

    pub fn genre_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn track_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.tracks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Groups records by genre
///
/// # Examples
///
/// ```
/// use tune_sieve::output::aggregate;
/// use tune_sieve::TrackRecord;
///
/// let report = aggregate(vec![
///     TrackRecord::new("a.mp3", "http://x/a.mp3", Some("Rock"), None),
///     TrackRecord::new("b.mp3", "http://x/b.mp3", Some("Jazz"), None),
///     TrackRecord::new("c.mp3", "http://x/c.mp3", Some("Rock"), None),
/// ]);
/// let names: Vec<_> = report.genres().iter().map(|g| g.name()).collect();
/// assert_eq!(names, vec!["Rock", "Jazz"]);
/// assert_eq!(report.genre("Rock").unwrap().tracks().len(), 2);
/// ```
pub fn aggregate<I>(records: I) -> GenreReport
where
    I: IntoIterator<Item = TrackRecord>,
{
    let mut buckets: Vec<GenreBucket> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let position = *positions
            .entry(record.genre().to_string())
            .or_insert_with(|| {
                buckets.push(GenreBucket {
                    name: record.genre().to_string(),
                    tracks: Vec::new(),
                });
                buckets.len() - 1
            });
        buckets[position].tracks.push(record);
    }

    GenreReport { buckets }
}
