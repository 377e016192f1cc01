//! HTML parser for extracting links and assets
//!
//! This module walks a parsed document and collects:
//! - Links to follow (from `<a href>`), filtered to the crawl scope
//! - Asset references (from `<img>`, `<link>`, `<script>`), unfiltered

use crate::url::{DomainMatcher, Resolver};
use scraper::Html;

/// Links and assets found on one page, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// In-scope absolute URLs from anchors
    pub links: Vec<String>,

    /// Absolute URLs of embedded resources, any domain
    pub assets: Vec<String>,
}

/// Parses an HTML body into a document tree
///
/// html5ever recovers from malformed markup, so this never fails; recovery
/// notes are logged at trace level.
pub fn parse_document(body: &str) -> Html {
    let document = Html::parse_document(body);
    if !document.errors.is_empty() {
        tracing::trace!("HTML parser recovered from {} errors", document.errors.len());
    }
    document
}

/// Walks `document` and collects its links and assets
///
/// # Extraction Rules
///
/// - `<a href="...">`: resolved against `page_url`; kept only if in scope
/// - `<img>`, `<link>`, `<script>`: `src` and `href`, in the order they
///   appear in the tag, resolved against `page_url`; kept regardless of domain
/// - No other element is inspected
/// - References that fail to resolve (fragments, `mailto:`, ...) are dropped
///
/// The walk is depth-first pre-order and iterative, so deeply nested
/// documents do not grow the call stack.
///
/// # Example
///
/// ```
/// use sumi_sitemap::crawler::{extract, parse_document};
/// use sumi_sitemap::url::{DomainMatcher, Resolver};
/// use url::Url;
///
/// let start = Url::parse("https://example.com/").unwrap();
/// let resolver = Resolver::new(&start);
/// let matcher = DomainMatcher::new("example.com");
///
/// let document = parse_document(r#"<a href="/about">About</a><img src="/logo.png">"#);
/// let page = extract(&document, "https://example.com/", &resolver, &matcher);
/// assert_eq!(page.links, vec!["https://example.com/about"]);
/// assert_eq!(page.assets, vec!["https://example.com/logo.png"]);
/// ```
pub fn extract(
    document: &Html,
    page_url: &str,
    resolver: &Resolver,
    matcher: &DomainMatcher,
) -> ExtractedPage {
    let mut extracted = ExtractedPage::default();

    for node in document.tree.root().descendants() {
        let Some(element) = node.value().as_element() else {
            continue;
        };

        match element.name() {
            "a" => {
                let Some(href) = element.attr("href") else {
                    continue;
                };
                match resolver.resolve(href, page_url) {
                    Ok(url) if matcher.in_scope(&url) => extracted.links.push(url),
                    Ok(url) => tracing::trace!("Skipped out-of-scope link {}", url),
                    Err(e) => tracing::trace!("Skipped link {:?}: {}", href, e),
                }
            }
            "img" | "link" | "script" => {
                let references = element
                    .attrs()
                    .filter(|(name, _)| matches!(*name, "src" | "href"))
                    .map(|(_, value)| value);
                for reference in references {
                    match resolver.resolve(reference, page_url) {
                        Ok(url) => extracted.assets.push(url),
                        Err(e) => tracing::trace!("Skipped asset {:?}: {}", reference, e),
                    }
                }
            }
            _ => {}
        }
    }

    extracted
}

/// Convenience function: parse `body` and extract in one step
///
/// The document tree is dropped before returning, so callers never hold it
/// across an await point.
pub fn parse_html(
    body: &str,
    page_url: &str,
    resolver: &Resolver,
    matcher: &DomainMatcher,
) -> ExtractedPage {
    let document = parse_document(body);
    extract(&document, page_url, resolver, matcher)
}
