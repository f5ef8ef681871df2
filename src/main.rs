//! Tune-Sieve main entry point
//!
//! This is the command-line interface for the Tune-Sieve MP3 harvester.

use clap::Parser;
use std::path::{Path, PathBuf};
use tune_sieve::config::{collect_seeds, load_config_with_hash, Config};
use tune_sieve::output::print_statistics;
use tune_sieve::{ConcurrencyMode, Pipeline};
use tracing_subscriber::EnvFilter;

/// Tune-Sieve: a genre-sorted MP3 link harvester
///
/// Tune-Sieve crawls a list of sites to a fixed link depth, reads the tags
/// of every MP3 it finds links to, and writes an XML playlist grouped by
/// genre.
#[derive(Parser, Debug)]
#[command(name = "tune-sieve")]
#[command(version = "1.0.0")]
#[command(about = "A genre-sorted MP3 link harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the configured crawl depth
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    depth: Option<u32>,

    /// Run every network operation one at a time
    #[arg(long)]
    sequential: bool,

    /// Override the configured report path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if cli.sequential {
        config.crawler.concurrency = ConcurrencyMode::Sequential;
    }
    if let Some(output) = &cli.output {
        config.output.report_path = output.to_string_lossy().into_owned();
    }

    let seeds = collect_seeds(&config)?;

    if cli.dry_run {
        handle_dry_run(&config, &config_hash, &seeds);
    } else {
        handle_run(&config, &seeds, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tune_sieve=info,warn"),
            1 => EnvFilter::new("tune_sieve=debug,info"),
            2 => EnvFilter::new("tune_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved settings and seeds
fn handle_dry_run(config: &Config, config_hash: &str, seeds: &[String]) {
    println!("=== Tune-Sieve Dry Run ===\n");
    println!("Config hash: {}\n", config_hash);

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Concurrency: {:?}", config.crawler.concurrency);
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nUser Agent: {}", config.user_agent.value);
    println!("Range: first {} bytes per track", config.metadata.range_bytes);

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\nSeeds ({}):", seeds.len());
    for seed in seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main run: crawl, fetch, aggregate, write
async fn handle_run(
    config: &Config,
    seeds: &[String],
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if seeds.is_empty() {
        tracing::warn!("No seed URLs configured; the report will be empty");
    }
    tracing::info!("Total seed URLs: {}", seeds.len());

    let pipeline = Pipeline::from_config(config)?;
    let report_path = Path::new(&config.output.report_path);

    match pipeline
        .run_to_file(
            seeds,
            config.crawler.max_depth,
            config.crawler.concurrency,
            report_path,
        )
        .await
    {
        Ok(report) => {
            tracing::info!("Run completed successfully");
            if !quiet {
                print_statistics(&pipeline.statistics(), report.genre_count());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
