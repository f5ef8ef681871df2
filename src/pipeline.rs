//! End-to-end run: crawl, fetch, aggregate
//!
//! Each stage finishes completely before the next begins: every crawl task
//! has returned before the first track is fetched, and every track fetch has
//! returned before aggregation starts.

use crate::config::{ConcurrencyMode, Config};
use crate::crawler::{Crawler, HtmlLinkExtractor, HttpFetcher, LinkExtractor};
use crate::metadata::{Id3TagDecoder, MetadataFetcher, TagDecoder};
use crate::output::{aggregate, write_report, GenreReport, RunStatistics, StatisticsSnapshot};
use crate::HarvestError;
use std::path::Path;
use std::sync::Arc;

/// Crawl-and-aggregate pipeline with pluggable link extraction and tag decoding
pub struct Pipeline {
    fetcher: HttpFetcher,
    extractor: Arc<dyn LinkExtractor>,
    decoder: Arc<dyn TagDecoder>,
    range_bytes: u64,
    stats: Arc<RunStatistics>,
}

impl Pipeline {
    /// Builds a pipeline with the default HTML link extractor and ID3 decoder
    pub fn new(fetcher: HttpFetcher, range_bytes: u64) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(HtmlLinkExtractor::new()),
            decoder: Arc::new(Id3TagDecoder::new()),
            range_bytes,
            stats: Arc::new(RunStatistics::new()),
        }
    }

    /// Builds a pipeline from the crawler, user agent and metadata settings
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::new(fetcher, config.metadata.range_bytes))
    }

    /// Replaces the link extractor
    pub fn with_link_extractor(mut self, extractor: Arc<dyn LinkExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replaces the tag decoder
    pub fn with_tag_decoder(mut self, decoder: Arc<dyn TagDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Counters accumulated over every run of this pipeline
    pub fn statistics(&self) -> StatisticsSnapshot {
        self.stats.snapshot()
    }

    /// Crawls the seeds, reads every discovered track and groups them by genre
    ///
    /// Per-URL failures only shrink the report. The one error returned is a
    /// failure to create the scratch directory for track downloads.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tune_sieve::config::Config;
    /// use tune_sieve::{ConcurrencyMode, Pipeline};
    ///
    /// # async fn example() -> tune_sieve::Result<()> {
    /// let pipeline = Pipeline::from_config(&Config::default())?;
    /// let seeds = vec!["https://example.com/music/".to_string()];
    /// let report = pipeline.run(&seeds, 2, ConcurrencyMode::Concurrent).await?;
    /// println!("{} genres", report.genre_count());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(
        &self,
        seeds: &[String],
        max_depth: u32,
        mode: ConcurrencyMode,
    ) -> Result<GenreReport, HarvestError> {
        let crawler = Crawler::new(
            self.fetcher.clone(),
            Arc::clone(&self.extractor),
            Arc::clone(&self.stats),
        );
        let audio_links = crawler.crawl(seeds, max_depth, mode).await;

        let metadata = MetadataFetcher::new(
            self.fetcher.clone(),
            Arc::clone(&self.decoder),
            self.range_bytes,
            Arc::clone(&self.stats),
        );
        let tracks = metadata.fetch_all(audio_links, mode).await?;

        let report = aggregate(tracks);
        tracing::info!(
            "Report ready: {} tracks in {} genres",
            report.track_count(),
            report.genre_count()
        );
        Ok(report)
    }

    /// Runs the pipeline and writes the XML report to `path`
    ///
    /// The report is written even when it is empty.
    pub async fn run_to_file(
        &self,
        seeds: &[String],
        max_depth: u32,
        mode: ConcurrencyMode,
        path: &Path,
    ) -> Result<GenreReport, HarvestError> {
        let report = self.run(seeds, max_depth, mode).await?;
        write_report(&report, path)?;
        Ok(report)
    }
}
