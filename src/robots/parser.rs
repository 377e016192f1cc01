//! Robots.txt parser implementation
//!
//! Two readings of the same file are supported: a flat list of `Disallow:`
//! paths, and a full user-agent aware evaluation via the robotstxt crate.

use robotstxt::DefaultMatcher;

/// Collects the path of every `Disallow:` directive, in file order
///
/// The keyword is case-sensitive and user-agent groups are ignored. Directives
/// with an empty path (which allow everything) contribute nothing.
pub fn parse_disallow_paths(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Disallow:"))
        .map(|path| path.split('#').next().unwrap_or_default().trim())
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parsed robots.txt data
///
/// This is a wrapper around the robotstxt crate's matcher, providing a
/// simplified interface for checking if URLs are allowed.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL (or path) to check
    /// * `user_agent` - The crawler's product token, e.g. "SumiSitemap"
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}
