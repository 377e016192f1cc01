//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests that follow redirects and report the final URL
//! - A redirect policy that refuses to follow hops into excluded URLs
//! - Classifying responses into a usable page or a typed fetch failure

use crate::config::Config;
use crate::url::{normalize_url, DomainMatcher};
use crate::{FetchFailure, SumiError};
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{redirect::Policy, Client, ClientBuilder, Response, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an in-scope HTML page
    Success {
        /// Final URL after redirects, normalized
        final_url: String,
        /// Page body content
        body: String,
    },

    /// The response was rejected before its body was read
    Failed(FetchFailure),

    /// The response was acceptable but its body could not be read as text
    BodyError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Converts into the page body, or the error to record for `url`
    pub fn into_result(self, url: &str) -> Result<FetchedPage, SumiError> {
        match self {
            Self::Success { final_url, body } => Ok(FetchedPage { final_url, body }),
            Self::Failed(failure) => Err(SumiError::Fetch {
                url: url.to_string(),
                failure,
            }),
            Self::BodyError { error } => Err(SumiError::HtmlParse {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// An HTML page ready for extraction
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub final_url: String,
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed up to `crawler.max-redirects`; the final URL is
/// checked against the crawl scope after the response arrives.
///
/// # Example
///
/// ```no_run
/// use sumi_sitemap::config::Config;
/// use sumi_sitemap::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    client_builder(config)
        .redirect(Policy::limited(config.crawler.max_redirects))
        .build()
}

/// Builds the client used for page fetches
///
/// Like [`build_http_client`], but a redirect hop whose normalized target
/// satisfies `skip_target` is not followed. The 3xx response is returned
/// as-is and [`fetch_page`] reports it as
/// [`FetchFailure::RedirectNotFollowed`], so the target is never requested.
pub fn build_crawl_client<F>(config: &Config, skip_target: F) -> Result<Client, reqwest::Error>
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    client_builder(config)
        .redirect(redirect_policy(config.crawler.max_redirects, skip_target))
        .build()
}

/// Follows up to `max_redirects` hops, stopping before any skipped target
pub fn redirect_policy<F>(max_redirects: usize, skip_target: F) -> Policy
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Policy::custom(move |attempt| {
        // `previous` includes the first request URL, as in `Policy::limited`
        if attempt.previous().len() >= max_redirects {
            return attempt.error("too many redirects");
        }

        let target = canonical(attempt.url().as_str());
        if skip_target(&target) {
            tracing::debug!("Not following redirect to {}", target);
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

fn client_builder(config: &Config) -> ClientBuilder {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
}

/// Normalizes a URL for comparison, falling back to the raw string
fn canonical(url: &str) -> String {
    normalize_url(url)
        .map(String::from)
        .unwrap_or_else(|_| url.to_string())
}

/// Returns true for HTML media types, ignoring parameters like `charset`
pub fn is_html_content_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    media_type == "text/html" || media_type == "application/xhtml+xml"
}

/// Decides whether a response can be crawled, before its body is read
///
/// # Checks (in order)
///
/// | Condition | Failure |
/// |-----------|---------|
/// | Content-Type missing or not HTML | ContentMismatch |
/// | Status other than 200 | HttpStatus |
/// | Final URL outside the crawl scope | OutOfScopeRedirect |
pub fn classify_response(
    status: StatusCode,
    content_type: Option<&str>,
    final_url: &str,
    matcher: &DomainMatcher,
) -> Option<FetchFailure> {
    let content_type = content_type.unwrap_or_default();
    if !is_html_content_type(content_type) {
        return Some(FetchFailure::ContentMismatch(content_type.to_string()));
    }

    if status != StatusCode::OK {
        return Some(FetchFailure::HttpStatus(status.as_u16()));
    }

    if !matcher.in_scope(final_url) {
        return Some(FetchFailure::OutOfScopeRedirect(final_url.to_string()));
    }

    None
}

/// Fetches a page and classifies the response
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `matcher` - The crawl scope, applied to the final URL after redirects
///
/// # Returns
///
/// A FetchResult indicating success or the type of failure
pub async fn fetch_page(client: &Client, url: &str, matcher: &DomainMatcher) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return FetchResult::Failed(classify_transport_error(&e)),
    };

    let status = response.status();
    let final_url = canonical(response.url().as_str());

    // Only a stopped redirect policy hands back a 3xx with a Location
    if status.is_redirection() {
        if let Some(target) = redirect_target(&response) {
            return FetchResult::Failed(FetchFailure::RedirectNotFollowed(target));
        }
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if let Some(failure) = classify_response(status, content_type.as_deref(), &final_url, matcher)
    {
        return FetchResult::Failed(failure);
    }

    if final_url != url {
        tracing::debug!("{} redirected to {}", url, final_url);
    }

    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) if e.is_timeout() => FetchResult::Failed(FetchFailure::Timeout),
        Err(e) => FetchResult::BodyError {
            error: e.to_string(),
        },
    }
}

/// Fetches a URL as plain text, for robots.txt
///
/// Any transport error or non-success status is returned as an error.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, SumiError> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

/// The normalized absolute target of a redirect response
fn redirect_target(response: &Response) -> Option<String> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    let target = response.url().join(location).ok()?;
    Some(canonical(target.as_str()))
}

fn classify_transport_error(error: &reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Transport("Connection refused".to_string())
    } else {
        FetchFailure::Transport(error.to_string())
    }
}
