//! Statistics generation from a crawl report
//!
//! This module provides functionality for summarizing and displaying
//! what a crawl found.

use crate::crawler::CrawlReport;
use crate::state::UrlState;
use std::collections::HashSet;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of pages recorded
    pub pages: usize,

    /// Total links over all pages, duplicates included
    pub total_links: usize,

    /// Distinct link targets
    pub unique_links: usize,

    /// Total assets over all pages, duplicates included
    pub total_assets: usize,

    /// Distinct asset URLs
    pub unique_assets: usize,

    /// URLs marked visited (includes redirect sources)
    pub visited: usize,

    /// URLs whose fetch failed
    pub errored: usize,

    /// URLs skipped because of robots.txt
    pub excluded: usize,
}

impl CrawlStatistics {
    /// Computes statistics from a finished crawl
    pub fn from_report(report: &CrawlReport) -> Self {
        let unique_links: HashSet<&str> = report
            .pages
            .iter()
            .flat_map(|p| p.links.iter().map(String::as_str))
            .collect();
        let unique_assets: HashSet<&str> = report
            .pages
            .iter()
            .flat_map(|p| p.assets.iter().map(String::as_str))
            .collect();

        Self {
            pages: report.page_count(),
            total_links: report.total_links(),
            unique_links: unique_links.len(),
            total_assets: report.total_assets(),
            unique_assets: unique_assets.len(),
            visited: report.state.count(UrlState::Visited),
            errored: report.state.count(UrlState::Errored),
            excluded: report.state.count(UrlState::Excluded),
        }
    }

    /// Share of attempted URLs that produced a page, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.visited + self.errored;
        if attempted == 0 {
            0.0
        } else {
            (self.visited as f64 / attempted as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages crawled: {}", stats.pages);
    println!(
        "  Links found: {} ({} unique)",
        stats.total_links, stats.unique_links
    );
    println!(
        "  Assets found: {} ({} unique)",
        stats.total_assets, stats.unique_assets
    );
    println!();

    println!("URLs by State:");
    for (state, count) in [
        (UrlState::Visited, stats.visited),
        (UrlState::Errored, stats.errored),
        (UrlState::Excluded, stats.excluded),
    ] {
        println!("  {}: {}", state, count);
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} URLs fetched successfully)",
        stats.success_rate(),
        stats.visited,
        stats.visited + stats.errored
    );
}
