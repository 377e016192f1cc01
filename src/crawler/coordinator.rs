//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop, which:
//! - Loads the robots.txt exclusions once before crawling
//! - Pops URLs from the frontier and filters them against the crawl state
//! - Coordinates fetching, extraction and link discovery
//! - Collects the resulting pages into a report

use crate::config::{Config, RobotsMode};
use crate::crawler::page::{CrawlReport, Page};
use crate::crawler::parser::parse_html;
use crate::crawler::scheduler::Frontier;
use crate::crawler::{build_crawl_client, build_http_client, fetch_page, FetchedPage};
use crate::robots::{load_exclusions, Exclusions};
use crate::state::{CrawlState, UrlState};
use crate::url::{extract_domain, normalize_url, DomainMatcher, Resolver};
use crate::SumiError;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use url::Url;

/// Single-domain breadth-first crawler
///
/// A `Crawler` is built for one start URL and consumed by [`Crawler::crawl`].
/// All crawl state is owned here and mutated through `&mut self`.
pub struct Crawler {
    start_url: Url,
    host: String,
    resolver: Resolver,
    matcher: DomainMatcher,
    robots_client: Client,
    client: Client,
    exclusions: Arc<OnceLock<Exclusions>>,
    robots_mode: RobotsMode,
    crawler_name: String,
    state: CrawlState,
    frontier: Frontier,
    pages: Vec<Page>,
    recorded: HashSet<String>,
}

impl Crawler {
    /// Creates a new crawler for `start_url`
    ///
    /// # Arguments
    ///
    /// * `start_url` - The address to start from; normalized before use
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(SumiError::InvalidStartUrl)` - The start URL is unusable
    /// * `Err(SumiError::Http)` - The HTTP client could not be built
    pub fn new(start_url: &str, config: &Config) -> Result<Self, SumiError> {
        let start = normalize_url(start_url).map_err(|e| SumiError::InvalidStartUrl {
            url: start_url.to_string(),
            reason: e.to_string(),
        })?;

        let host = extract_domain(&start).ok_or_else(|| SumiError::InvalidStartUrl {
            url: start_url.to_string(),
            reason: "URL has no host".to_string(),
        })?;

        let robots_client = build_http_client(config)?;

        // Set by `crawl` once robots.txt is loaded; read on every redirect hop
        let exclusions: Arc<OnceLock<Exclusions>> = Arc::default();
        let policy_exclusions = Arc::clone(&exclusions);
        let client = build_crawl_client(config, move |target: &str| {
            policy_exclusions
                .get()
                .is_some_and(|exclusions| exclusions.is_excluded(target))
        })?;

        Ok(Self {
            resolver: Resolver::new(&start),
            matcher: DomainMatcher::new(&host),
            frontier: Frontier::seeded(start.as_str()),
            start_url: start,
            host,
            robots_client,
            client,
            exclusions,
            robots_mode: config.robots.mode,
            crawler_name: config.user_agent.crawler_name.clone(),
            state: CrawlState::new(),
            pages: Vec::new(),
            recorded: HashSet::new(),
        })
    }

    /// The normalized start URL
    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// The start URL's host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The crawl scope derived from the host
    pub fn matcher(&self) -> &DomainMatcher {
        &self.matcher
    }

    /// Runs the crawl to completion and returns everything it found
    ///
    /// Per-URL failures are recorded in the report's state and never abort
    /// the crawl.
    pub async fn crawl(mut self) -> CrawlReport {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} (scope: {})",
            self.start_url,
            self.matcher
                .apex()
                .unwrap_or("unrestricted, host has no registrable apex")
        );

        let exclusions = load_exclusions(
            &self.robots_client,
            &self.resolver,
            self.start_url.as_str(),
            self.robots_mode,
            &self.crawler_name,
        )
        .await;
        if self.exclusions.set(exclusions).is_err() {
            tracing::warn!("Exclusions were already loaded; keeping the first set");
        }

        let mut attempts = 0usize;
        while let Some(url) = self.frontier.pop() {
            if !self.state.is_unseen(&url) {
                continue;
            }

            if self.is_excluded(&url) {
                tracing::debug!("Excluded by robots.txt: {}", url);
                self.state.mark_excluded(&url);
                continue;
            }

            self.visit(&url).await;

            attempts += 1;
            if attempts % 10 == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                    self.pages.len(),
                    self.frontier.len(),
                    attempts as f64 / elapsed.as_secs_f64()
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages, {} errored, {} excluded, {} links queued in {:?}",
            self.pages.len(),
            self.state.count(UrlState::Errored),
            self.state.count(UrlState::Excluded),
            self.frontier.total_enqueued(),
            start_time.elapsed()
        );

        CrawlReport {
            start_url: self.start_url.to_string(),
            pages: self.pages,
            state: self.state,
        }
    }

    /// Fetches one URL and records its outcome
    async fn visit(&mut self, url: &str) {
        tracing::debug!("Fetching {}", url);

        let fetched = match fetch_page(&self.client, url, &self.matcher)
            .await
            .into_result(url)
        {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!("{}", e);
                self.state.mark_errored(url);
                return;
            }
        };

        if fetched.final_url != url && !self.accept_redirect(url, &fetched.final_url) {
            self.state.mark_errored(url);
            return;
        }

        self.state.mark_visited(url);
        self.record(fetched);
    }

    /// Returns true if `url` is disallowed by robots.txt
    fn is_excluded(&self, url: &str) -> bool {
        self.exclusions
            .get()
            .is_some_and(|exclusions| exclusions.is_excluded(url))
    }

    /// Decides whether a page reached by redirecting from `url` may be kept
    ///
    /// The final URL must not be excluded and must not already be errored or
    /// excluded. An unseen final URL is marked visited here.
    fn accept_redirect(&mut self, url: &str, final_url: &str) -> bool {
        if self.is_excluded(final_url) {
            tracing::warn!("{} redirected into excluded {}", url, final_url);
            return false;
        }

        match self.state.state_of(final_url) {
            None => {
                self.state.mark_visited(final_url);
                true
            }
            Some(UrlState::Visited) => true,
            Some(state) => {
                tracing::warn!("{} redirected to {} ({})", url, final_url, state);
                false
            }
        }
    }

    /// Extracts a fetched page and queues its links
    ///
    /// The page is keyed by its final URL; a redirect onto a page that was
    /// already recorded adds nothing.
    fn record(&mut self, fetched: FetchedPage) {
        let FetchedPage { final_url, body } = fetched;

        if !self.recorded.insert(final_url.clone()) {
            tracing::debug!("Already recorded {}, skipping", final_url);
            return;
        }

        let extracted = parse_html(&body, &final_url, &self.resolver, &self.matcher);
        tracing::debug!(
            "{}: {} links, {} assets",
            final_url,
            extracted.links.len(),
            extracted.assets.len()
        );

        self.frontier.extend(extracted.links.iter().cloned());
        self.pages.push(Page {
            referrer: final_url,
            links: extracted.links,
            assets: extracted.assets,
        });
    }
}
