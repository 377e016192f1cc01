use crate::state::UrlState;
use std::collections::HashMap;

/// Tracks which URLs have reached a terminal state during one crawl
///
/// Each URL maps to at most one [`UrlState`], so the visited, errored and
/// excluded sets can never overlap. States are only ever added: a URL that
/// has a state keeps it for the rest of the crawl.
#[derive(Debug, Clone, Default)]
pub struct CrawlState {
    states: HashMap<String, UrlState>,
}

impl CrawlState {
    /// Creates an empty state where every URL is unseen
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the terminal state of `url`, or None if it is unseen
    pub fn state_of(&self, url: &str) -> Option<UrlState> {
        self.states.get(url).copied()
    }

    /// Returns true if `url` has no recorded state
    pub fn is_unseen(&self, url: &str) -> bool {
        !self.states.contains_key(url)
    }

    /// Records `state` for an unseen URL
    ///
    /// # Returns
    ///
    /// * `true` - The state was recorded
    /// * `false` - The URL already had a state, which is left unchanged
    pub fn mark(&mut self, url: &str, state: UrlState) -> bool {
        if self.states.contains_key(url) {
            return false;
        }
        self.states.insert(url.to_string(), state);
        true
    }

    /// Shorthand for `mark(url, UrlState::Visited)`
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.mark(url, UrlState::Visited)
    }

    /// Shorthand for `mark(url, UrlState::Errored)`
    pub fn mark_errored(&mut self, url: &str) -> bool {
        self.mark(url, UrlState::Errored)
    }

    /// Shorthand for `mark(url, UrlState::Excluded)`
    pub fn mark_excluded(&mut self, url: &str) -> bool {
        self.mark(url, UrlState::Excluded)
    }

    /// Returns the URLs in `state`, sorted
    pub fn urls_in(&self, state: UrlState) -> Vec<&str> {
        let mut urls: Vec<&str> = self
            .states
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(url, _)| url.as_str())
            .collect();
        urls.sort_unstable();
        urls
    }

    /// Counts the URLs in `state`
    pub fn count(&self, state: UrlState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }

    /// Total number of URLs with any state
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no URL has a state yet
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
