//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `UrlState`: The terminal state of a URL (visited, errored, excluded)
//! - `CrawlState`: The per-crawl ledger mapping URLs to their terminal state

mod crawl_state;
mod url_state;

pub use crawl_state::CrawlState;
pub use url_state::UrlState;
