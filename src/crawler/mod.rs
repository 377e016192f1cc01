//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and response classification
//! - HTML parsing and link/asset extraction
//! - The FIFO frontier
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod page;
mod parser;
mod scheduler;

pub use coordinator::Crawler;
pub use fetcher::{
    build_crawl_client, build_http_client, classify_response, fetch_page, fetch_text,
    is_html_content_type, redirect_policy, FetchResult, FetchedPage,
};
pub use page::{CrawlReport, Page};
pub use parser::{extract, parse_document, parse_html, ExtractedPage};
pub use scheduler::Frontier;

use crate::config::Config;
use crate::SumiError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Normalize and validate the start URL
/// 2. Build the HTTP client
/// 3. Load robots.txt exclusions
/// 4. Fetch pages breadth-first, following in-scope links
///
/// # Arguments
///
/// * `start_url` - The address to start from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The pages found and the state of every URL touched
/// * `Err(SumiError)` - The start URL was invalid or the client failed to build
///
/// # Example
///
/// ```no_run
/// use sumi_sitemap::config::Config;
/// use sumi_sitemap::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl("https://example.com/", &Config::default()).await?;
/// println!("{} pages", report.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(start_url: &str, config: &Config) -> Result<CrawlReport, SumiError> {
    let crawler = Crawler::new(start_url, config)?;
    Ok(crawler.crawl().await)
}
