//! Crawler coordinator - depth-bounded link discovery
//!
//! The crawl is a work queue of `CrawlTask`s. Visiting a task fetches its
//! page, collects every audio link on it, and (above the last level) probes
//! the remaining links to decide which ones are HTML pages worth visiting
//! next. A visit hands back the child tasks it has already claimed in the
//! shared visited set, and the driver dispatches them:
//!
//! - `Concurrent`: every task runs on its own tokio task inside a `JoinSet`
//! - `Sequential`: tasks are awaited one at a time in FIFO order
//!
//! Either way `crawl` returns only after the queue has drained, and no URL
//! is dispatched twice. Fetch and probe failures stop descent from that node
//! and nothing more.

use crate::config::ConcurrencyMode;
use crate::crawler::fetcher::HttpFetcher;
use crate::crawler::parser::LinkExtractor;
use crate::output::RunStatistics;
use crate::url::{
    classify_link, is_skippable_link, looks_like_html, normalize_link, normalize_url, LinkKind,
};
use futures::future::join_all;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;

/// One unit of crawl work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// Page to fetch
    pub url: String,

    /// Levels left to traverse from this page; 1 means collect-only
    pub remaining_depth: u32,
}

/// Depth-bounded crawler that collects audio links
pub struct Crawler {
    fetcher: HttpFetcher,
    extractor: Arc<dyn LinkExtractor>,
    stats: Arc<RunStatistics>,
}

impl Crawler {
    /// Creates a crawler over the given fetcher and link extractor
    pub fn new(
        fetcher: HttpFetcher,
        extractor: Arc<dyn LinkExtractor>,
        stats: Arc<RunStatistics>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            stats,
        }
    }

    /// Crawls every seed to `max_depth` and returns the audio links found
    ///
    /// The result is unordered and keeps duplicates: the same file linked
    /// from two pages appears twice.
    ///
    /// # Arguments
    ///
    /// * `seeds` - Pages to start from; duplicates are visited once
    /// * `max_depth` - Depth given to each seed; 1 visits only the seeds
    /// * `mode` - How crawl tasks are scheduled
    pub async fn crawl(&self, seeds: &[String], max_depth: u32, mode: ConcurrencyMode) -> Vec<String> {
        let walk = Arc::new(Walk {
            fetcher: self.fetcher.clone(),
            extractor: Arc::clone(&self.extractor),
            stats: Arc::clone(&self.stats),
            mode,
            visited: Mutex::new(HashSet::new()),
            audio_links: Mutex::new(Vec::new()),
        });

        let initial: Vec<CrawlTask> = seeds
            .iter()
            .filter_map(|seed| match normalize_url(seed) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!("Skipping seed: {}", e);
                    None
                }
            })
            .filter(|url| walk.claim(url))
            .map(|url| CrawlTask {
                url,
                remaining_depth: max_depth,
            })
            .collect();

        tracing::info!(
            "Crawling {} seed pages to depth {} ({:?})",
            initial.len(),
            max_depth,
            mode
        );

        match mode {
            ConcurrencyMode::Concurrent => drive_concurrent(&walk, initial).await,
            ConcurrencyMode::Sequential => drive_sequential(&walk, initial).await,
        }

        let visited = walk
            .visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        let links = std::mem::take(
            &mut *walk
                .audio_links
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );

        tracing::info!(
            "Crawl finished: {} pages dispatched, {} audio links",
            visited,
            links.len()
        );

        links
    }
}

/// Runs every task on its own tokio task until none are left
async fn drive_concurrent(walk: &Arc<Walk>, initial: Vec<CrawlTask>) {
    let mut tasks = JoinSet::new();
    for task in initial {
        tasks.spawn(Arc::clone(walk).visit(task));
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(children) => {
                for child in children {
                    tasks.spawn(Arc::clone(walk).visit(child));
                }
            }
            Err(e) => tracing::error!("Crawl task failed: {}", e),
        }
    }
}

/// Runs tasks one at a time in FIFO order
async fn drive_sequential(walk: &Arc<Walk>, initial: Vec<CrawlTask>) {
    let mut queue: VecDeque<CrawlTask> = initial.into();
    while let Some(task) = queue.pop_front() {
        let children = Arc::clone(walk).visit(task).await;
        queue.extend(children);
    }
}

/// State of one `crawl` call, shared by all of its tasks
struct Walk {
    fetcher: HttpFetcher,
    extractor: Arc<dyn LinkExtractor>,
    stats: Arc<RunStatistics>,
    mode: ConcurrencyMode,
    visited: Mutex<HashSet<String>>,
    audio_links: Mutex<Vec<String>>,
}

impl Walk {
    /// Marks `url` as dispatched; false if it already was
    fn claim(&self, url: &str) -> bool {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string())
    }

    /// Gives back a claim taken for a candidate that turned out not to be a page
    fn release(&self, url: &str) {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);
    }

    fn collect_audio(&self, url: String) {
        tracing::debug!("Found audio link {}", url);
        self.stats.record_audio_link();
        self.audio_links
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url);
    }

    /// Processes one page and returns the child tasks it claimed
    ///
    /// A candidate is claimed before its probe goes out, so a link shared by
    /// pages visited at the same time is probed once.
    async fn visit(self: Arc<Self>, task: CrawlTask) -> Vec<CrawlTask> {
        tracing::debug!("Visiting {} (depth {})", task.url, task.remaining_depth);

        let body = match self.fetcher.fetch_page(&task.url).await {
            Ok(body) => {
                self.stats.record_page_fetched();
                body
            }
            Err(e) => {
                self.stats.record_page_failure();
                tracing::warn!("Skipping page: {}", e);
                return Vec::new();
            }
        };

        let mut candidates = Vec::new();
        for raw in self.extractor.extract_links(&body).into_iter().flatten() {
            if is_skippable_link(&raw) {
                continue;
            }

            let link = match normalize_link(&task.url, &raw) {
                Ok(link) => link,
                Err(e) => {
                    tracing::debug!("Ignoring link on {}: {}", task.url, e);
                    continue;
                }
            };

            match classify_link(&link) {
                LinkKind::Audio => self.collect_audio(link),
                LinkKind::PageCandidate if task.remaining_depth > 1 => candidates.push(link),
                LinkKind::PageCandidate => {}
            }
        }

        if candidates.is_empty() {
            return Vec::new();
        }

        let probes: Vec<_> = candidates
            .into_iter()
            .map(|link| Arc::clone(&self).probe_candidate(link))
            .collect();

        let pages = match self.mode {
            ConcurrencyMode::Concurrent => join_all(probes).await,
            ConcurrencyMode::Sequential => {
                let mut pages = Vec::with_capacity(probes.len());
                for probe in probes {
                    pages.push(probe.await);
                }
                pages
            }
        };

        let child_depth = task.remaining_depth - 1;
        pages
            .into_iter()
            .flatten()
            .map(|url| CrawlTask {
                url,
                remaining_depth: child_depth,
            })
            .collect()
    }

    /// Claims the link and returns it if it is an HTML page
    ///
    /// Links that fail the probe or are not HTML are released again.
    async fn probe_candidate(self: Arc<Self>, link: String) -> Option<String> {
        if !self.claim(&link) {
            return None;
        }

        self.stats.record_probe();
        match self.fetcher.probe(&link).await {
            Ok(probe) if looks_like_html(&link) || probe.is_html() => Some(link),
            Ok(probe) => {
                tracing::trace!(
                    "Not descending into {} (content type {:?})",
                    link,
                    probe.content_type
                );
                self.release(&link);
                None
            }
            Err(e) => {
                self.stats.record_probe_failure();
                tracing::debug!("Probe failed: {}", e);
                self.release(&link);
                None
            }
        }
    }
}
