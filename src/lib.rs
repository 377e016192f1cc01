//! Sumi-Sitemap: a single-domain site mapper
//!
//! This crate crawls every reachable page of one domain breadth-first,
//! respecting robots.txt, and records the in-domain links and the asset
//! references found on each page.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Sitemap operations
#[derive(Debug, Error)]
pub enum SumiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid start URL '{url}': {reason}")]
    InvalidStartUrl { url: String, reason: String },

    #[error("Fetch failed for {url}: {failure}")]
    Fetch { url: String, failure: FetchFailure },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Reasons a single page fetch did not produce a usable document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("content type '{0}' is not HTML")]
    ContentMismatch(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("redirected out of scope to {0}")]
    OutOfScopeRedirect(String),

    #[error("redirect to {0} not followed")]
    RedirectNotFollowed(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
///
/// When returned from reference resolution these mean "skip this reference";
/// they are never recorded as crawl errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Empty reference")]
    EmptyReference,

    #[error("Reference has no path: {0}")]
    FragmentOnly(String),

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Sumi-Sitemap operations
pub type Result<T> = std::result::Result<T, SumiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, Page};
pub use state::{CrawlState, UrlState};
pub use crate::url::{normalize_url, DomainMatcher, Resolver};
