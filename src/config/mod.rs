//! Configuration module for Tune-Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and reading the XML site list that supplies seed URLs.
//!
//! # Example
//!
//! ```no_run
//! use tune_sieve::config::{collect_seeds, load_config};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("tune-sieve.toml")).unwrap();
//! let seeds = collect_seeds(&config).unwrap();
//! println!("Crawling {} sites to depth {}", seeds.len(), config.crawler.max_depth);
//! ```

mod parser;
mod site_list;
mod types;
mod validation;

// Re-export types
pub use types::{
    ConcurrencyMode, Config, CrawlerConfig, InputConfig, MetadataConfig, OutputConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{config_fingerprint, load_config, load_config_with_hash, parse_config};
pub use site_list::{load_site_list, parse_site_list};

use crate::HarvestError;
use std::path::Path;

/// Gathers every seed URL named by the configuration
///
/// Site list entries come first, in document order, followed by the inline
/// `seeds`. Site list entries that are not valid seed URLs are logged and
/// skipped.
pub fn collect_seeds(config: &Config) -> Result<Vec<String>, HarvestError> {
    let mut seeds = Vec::new();

    if let Some(site_list) = &config.input.site_list {
        for site in load_site_list(Path::new(site_list))? {
            match validation::validate_seed(&site) {
                Ok(()) => seeds.push(site),
                Err(e) => tracing::warn!("Skipping site list entry: {}", e),
            }
        }
    }

    seeds.extend(config.input.seeds.iter().cloned());
    Ok(seeds)
}
