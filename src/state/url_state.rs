//! URL state definitions for tracking crawl progress
//!
//! A URL with no recorded state is unseen. Every state below is terminal: once
//! a URL has one, it is never attempted again.

use std::fmt;

/// The terminal state of a URL in a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    /// Page was fetched and contributed a Page record
    Visited,

    /// Fetch, validation, or parsing failed
    Errored,

    /// Disallowed by robots.txt, never fetched
    Excluded,
}

impl UrlState {
    /// Returns the lowercase name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visited => "visited",
            Self::Errored => "errored",
            Self::Excluded => "excluded",
        }
    }

    /// Returns all possible URL states
    pub fn all_states() -> [Self; 3] {
        [Self::Visited, Self::Errored, Self::Excluded]
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
