//! Crawl results: one `Page` per successfully crawled document, gathered into
//! a `CrawlReport`.

use crate::state::{CrawlState, UrlState};
use std::fmt;

/// One successfully crawled document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Canonical (post-redirect, normalized) URL of this page
    pub referrer: String,

    /// In-domain absolute URLs linked from this page, in document order
    pub links: Vec<String>,

    /// Absolute URLs of images, stylesheets and scripts, any domain
    pub assets: Vec<String>,
}

impl fmt::Display for Page {
    /// Referrer line, then the numbered links and assets
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page: {}", self.referrer)?;
        writeln!(f, "Links:")?;
        for (i, link) in self.links.iter().enumerate() {
            writeln!(f, "\t{} -> {}", i, link)?;
        }
        writeln!(f, "Assets:")?;
        for (i, asset) in self.assets.iter().enumerate() {
            writeln!(f, "\t{} -> {}", i, asset)?;
        }
        Ok(())
    }
}

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The normalized start URL
    pub start_url: String,

    /// Pages in crawl order; each referrer appears once
    pub pages: Vec<Page>,

    /// Terminal state of every URL the crawl touched
    pub state: CrawlState,
}

impl CrawlReport {
    /// Number of pages crawled
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Sum of links over all pages
    pub fn total_links(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }

    /// Sum of assets over all pages
    pub fn total_assets(&self) -> usize {
        self.pages.iter().map(|p| p.assets.len()).sum()
    }

    /// Looks up the page recorded for `referrer`
    pub fn page(&self, referrer: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.referrer == referrer)
    }

    /// URLs that failed to produce a page, sorted
    pub fn errored(&self) -> Vec<&str> {
        self.state.urls_in(UrlState::Errored)
    }

    /// URLs skipped because robots.txt disallowed them, sorted
    pub fn excluded(&self) -> Vec<&str> {
        self.state.urls_in(UrlState::Excluded)
    }
}
