//! Reference resolution
//!
//! Turns the raw value of an `href`/`src` attribute into a normalized
//! absolute URL, relative to the page it was found on and the crawl's start
//! origin.

use crate::url::normalize_url;
use crate::UrlError;
use url::{ParseError, Url};

/// Resolves hyperlink and asset references for one crawl
///
/// Root-relative references (`/about`) resolve against the start URL's
/// origin, not the referring page's. Protocol-relative references
/// (`//cdn.example.com/app.js`) inherit the referring page's scheme.
#[derive(Debug, Clone)]
pub struct Resolver {
    origin: String,
}

impl Resolver {
    /// Creates a resolver rooted at the origin of `start_url`
    pub fn new(start_url: &Url) -> Self {
        Self {
            origin: start_url.origin().ascii_serialization(),
        }
    }

    /// The start origin, e.g. `https://example.com` or `http://127.0.0.1:8080`
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Resolves `reference` found on the page at `referer`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The normalized absolute URL
    /// * `Err(UrlError)` - The reference names no crawlable resource and
    ///   should be skipped
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_sitemap::url::Resolver;
    /// use url::Url;
    ///
    /// let start = Url::parse("https://example.com/").unwrap();
    /// let resolver = Resolver::new(&start);
    ///
    /// let url = resolver.resolve("/about", "https://blog.example.com/post").unwrap();
    /// assert_eq!(url, "https://example.com/about");
    /// assert!(resolver.resolve("#top", "https://example.com/").is_err());
    /// ```
    pub fn resolve(&self, reference: &str, referer: &str) -> Result<String, UrlError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(UrlError::EmptyReference);
        }

        let absolute = match Url::parse(reference) {
            // Already absolute; scheme and host are checked by normalization
            Ok(_) => reference.to_string(),
            Err(ParseError::RelativeUrlWithoutBase) => self.absolutize(reference, referer)?,
            Err(e) => return Err(UrlError::Parse(e.to_string())),
        };

        let normalized = normalize_url(&absolute)?;
        Ok(normalized.into())
    }

    /// Builds an absolute URL string from a reference without a scheme
    fn absolutize(&self, reference: &str, referer: &str) -> Result<String, UrlError> {
        if reference.starts_with("//") {
            let referer = Url::parse(referer).map_err(|e| UrlError::Parse(e.to_string()))?;
            return Ok(format!("{}:{}", referer.scheme(), reference));
        }

        let without_fragment = reference.split('#').next().unwrap_or_default();
        let path = without_fragment.split('?').next().unwrap_or_default();
        if path.is_empty() {
            return Err(UrlError::FragmentOnly(reference.to_string()));
        }

        if path.starts_with('/') {
            Ok(format!("{}{}", self.origin, without_fragment))
        } else {
            Ok(format!("{}{}", referer, without_fragment))
        }
    }
}
