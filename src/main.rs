//! Sumi-Sitemap main entry point
//!
//! This is the command-line interface for the Sumi-Sitemap site mapper.

use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use sumi_sitemap::config::{load_config_with_hash, Config};
use sumi_sitemap::crawler::crawl;
use sumi_sitemap::output::{print_site_map, print_statistics, CrawlStatistics};
use tracing_subscriber::EnvFilter;

/// Sumi-Sitemap: a polite single-domain site mapper
///
/// Sumi-Sitemap crawls every reachable page of one domain breadth-first,
/// respecting robots.txt, and prints each page with the links and assets it
/// references.
#[derive(Parser, Debug)]
#[command(name = "sumi-sitemap")]
#[command(version)]
#[command(about = "A polite single-domain site mapper", long_about = None)]
struct Cli {
    /// Address to start crawling from (overrides crawler.start-url)
    #[arg(value_name = "START_URL")]
    start_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print only the summary and statistics, not every page
    #[arg(long)]
    summary_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load(path)?,
        None => Config::default(),
    };

    let start_url = cli
        .start_url
        .clone()
        .or_else(|| config.crawler.start_url.clone())
        .ok_or_else(|| anyhow!("no start URL given on the command line or in the config"))?;

    handle_crawl(&start_url, &config, cli.summary_only).await?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_sitemap=info,warn"),
            1 => EnvFilter::new("sumi_sitemap=debug,info"),
            2 => EnvFilter::new("sumi_sitemap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads and validates the configuration file
fn load(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Handles the main crawl operation
async fn handle_crawl(start_url: &str, config: &Config, summary_only: bool) -> anyhow::Result<()> {
    tracing::info!(
        "User agent: {}, robots mode: {:?}",
        config.user_agent.header_value(),
        config.robots.mode
    );

    let report = match crawl(start_url, config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_site_map(&report, summary_only);
    if summary_only {
        println!();
        print_statistics(&CrawlStatistics::from_report(&report));
    }

    Ok(())
}
