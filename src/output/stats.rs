//! Run statistics
//!
//! Counters are bumped from many concurrent tasks, so they are plain atomics
//! behind a shared `RunStatistics`. A `StatisticsSnapshot` is taken once the
//! run has finished and is what gets printed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared by every task of one run
#[derive(Debug, Default)]
pub struct RunStatistics {
    pages_fetched: AtomicU64,
    page_failures: AtomicU64,
    probes_issued: AtomicU64,
    probe_failures: AtomicU64,
    audio_links: AtomicU64,
    tracks_reported: AtomicU64,
    tracks_dropped: AtomicU64,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page_failure(&self) {
        self.page_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_probe(&self) {
        self.probes_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_probe_failure(&self) {
        self.probe_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_audio_link(&self) {
        self.audio_links.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_track(&self) {
        self.tracks_reported.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_track(&self) {
        self.tracks_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the current counter values
    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            page_failures: self.page_failures.load(Ordering::Relaxed),
            probes_issued: self.probes_issued.load(Ordering::Relaxed),
            probe_failures: self.probe_failures.load(Ordering::Relaxed),
            audio_links: self.audio_links.load(Ordering::Relaxed),
            tracks_reported: self.tracks_reported.load(Ordering::Relaxed),
            tracks_dropped: self.tracks_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    /// Pages whose body was fetched and scanned for links
    pub pages_fetched: u64,

    /// Pages that could not be fetched
    pub page_failures: u64,

    /// HEAD probes sent to page candidates
    pub probes_issued: u64,

    /// HEAD probes that failed
    pub probe_failures: u64,

    /// Audio links collected, duplicates included
    pub audio_links: u64,

    /// Tracks that made it into the report
    pub tracks_reported: u64,

    /// Audio links whose partial fetch failed
    pub tracks_dropped: u64,
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StatisticsSnapshot, genres: usize) {
    println!("=== Run Statistics ===\n");

    println!("Crawl:");
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Page failures: {}", stats.page_failures);
    println!(
        "  Probes issued: {} ({} failed)",
        stats.probes_issued, stats.probe_failures
    );
    println!("  Audio links found: {}", stats.audio_links);
    println!();

    println!("Tracks:");
    println!("  Reported: {}", stats.tracks_reported);
    println!("  Dropped: {}", stats.tracks_dropped);
    println!("  Genres: {}", genres);
    println!();

    let attempted = stats.tracks_reported + stats.tracks_dropped;
    let success_rate = if attempted > 0 {
        (stats.tracks_reported as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} tracks read)",
        success_rate, stats.tracks_reported, attempted
    );
}
