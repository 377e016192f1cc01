//! Output module for reporting crawl results
//!
//! This module handles:
//! - Formatting the site map (each page with its numbered links and assets)
//! - Summarizing crawl statistics

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics};

use crate::crawler::{CrawlReport, Page};

/// Formats one page as its referrer followed by numbered links and assets
///
/// # Example
///
/// ```
/// use sumi_sitemap::output::format_page;
/// use sumi_sitemap::Page;
///
/// let page = Page {
///     referrer: "https://example.com/".to_string(),
///     links: vec!["https://example.com/about".to_string()],
///     assets: vec![],
/// };
/// let text = format_page(&page);
/// assert!(text.starts_with("Page: https://example.com/\n"));
/// assert!(text.contains("\t0 -> https://example.com/about\n"));
/// ```
pub fn format_page(page: &Page) -> String {
    page.to_string()
}

/// Formats the whole site map, pages in crawl order
pub fn format_site_map(report: &CrawlReport) -> String {
    report.pages.iter().map(format_page).collect()
}

/// Formats the closing summary lines
pub fn format_summary(report: &CrawlReport) -> String {
    let stats = CrawlStatistics::from_report(report);
    format!(
        "Crawled {} pages with {} urls\n{} errored, {} excluded\n",
        stats.pages, stats.total_links, stats.errored, stats.excluded
    )
}

/// Prints the site map and summary to stdout
///
/// # Arguments
///
/// * `report` - The finished crawl
/// * `summary_only` - Skip the per-page listing
pub fn print_site_map(report: &CrawlReport, summary_only: bool) {
    if !summary_only {
        print!("{}", format_site_map(report));
    }
    print!("{}", format_summary(report));
}
