//! Robots.txt handling module
//!
//! The target domain's robots.txt is fetched once, before crawling starts, and
//! turned into an [`Exclusions`] set that the crawl loop consults before every
//! fetch.

mod parser;

pub use parser::{parse_disallow_paths, ParsedRobots};

use crate::config::RobotsMode;
use crate::crawler::fetch_text;
use crate::url::Resolver;
use reqwest::Client;

/// URLs the site operator asked crawlers not to fetch
///
/// In prefix mode a URL is excluded when it starts with one of the resolved
/// `Disallow:` URLs. In agent mode the robotstxt matcher alone decides, for
/// the configured user agent, so `Allow` lines and agent-specific groups can
/// lift a `Disallow` that applies to other agents.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    prefixes: Vec<String>,
    agent: Option<AgentRules>,
}

#[derive(Debug, Clone)]
struct AgentRules {
    robots: ParsedRobots,
    user_agent: String,
}

impl Exclusions {
    /// An empty set: nothing is excluded
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds exclusions from robots.txt content
    ///
    /// Each `Disallow:` path is resolved against `start_url` so it compares
    /// like-for-like with resolved links. Paths that fail to resolve are
    /// dropped.
    pub fn from_robots_txt(
        content: &str,
        resolver: &Resolver,
        start_url: &str,
        mode: RobotsMode,
        user_agent: &str,
    ) -> Self {
        let mut prefixes = Vec::new();
        for path in parse_disallow_paths(content) {
            match resolver.resolve(&path, start_url) {
                Ok(url) => {
                    if !prefixes.contains(&url) {
                        prefixes.push(url);
                    }
                }
                Err(e) => tracing::debug!("Ignoring Disallow path {:?}: {}", path, e),
            }
        }

        let agent = match mode {
            RobotsMode::Prefix => None,
            RobotsMode::Agent => Some(AgentRules {
                robots: ParsedRobots::from_content(content),
                user_agent: user_agent.to_string(),
            }),
        };

        Self { prefixes, agent }
    }

    /// Checks whether `url` must not be fetched
    pub fn is_excluded(&self, url: &str) -> bool {
        match &self.agent {
            Some(rules) => !rules.robots.is_allowed(url, &rules.user_agent),
            None => self.prefixes.iter().any(|prefix| url.starts_with(prefix)),
        }
    }

    /// The resolved disallowed URL prefixes
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Number of disallowed prefixes
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns true if there are no disallowed prefixes and no agent rules
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.agent.is_none()
    }
}

/// Fetches robots.txt for the crawl's origin and builds its exclusions
///
/// A failed fetch (transport error or non-success status) is not an error:
/// the crawl proceeds with no exclusions.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `resolver` - The crawl's resolver; its origin locates robots.txt
/// * `start_url` - The normalized start URL
/// * `mode` - How to interpret the directives
/// * `user_agent` - Product token for agent-mode matching
pub async fn load_exclusions(
    client: &Client,
    resolver: &Resolver,
    start_url: &str,
    mode: RobotsMode,
    user_agent: &str,
) -> Exclusions {
    let robots_url = format!("{}/robots.txt", resolver.origin());

    match fetch_text(client, &robots_url).await {
        Ok(content) => {
            let exclusions =
                Exclusions::from_robots_txt(&content, resolver, start_url, mode, user_agent);
            tracing::info!(
                "Loaded {} with {} disallowed prefixes",
                robots_url,
                exclusions.len()
            );
            tracing::debug!("Disallowed prefixes: {:?}", exclusions.prefixes());
            exclusions
        }
        Err(e) => {
            tracing::warn!(
                "Could not fetch {}: {}; crawling without exclusions",
                robots_url,
                e
            );
            Exclusions::none()
        }
    }
}
