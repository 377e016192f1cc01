use crate::url::extract_domain;
use url::Url;

/// Checks if a domain matches a wildcard pattern
///
/// This function supports two types of patterns:
/// 1. Exact match: "example.com" matches only "example.com"
/// 2. Wildcard match: "*.example.com" matches:
///    - "example.com" (the bare domain)
///    - "blog.example.com" (single subdomain)
///    - "api.v2.example.com" (nested subdomains)
///
/// # Examples
///
/// ```
/// use sumi_sitemap::url::matches_wildcard;
///
/// assert!(matches_wildcard("example.com", "example.com"));
/// assert!(matches_wildcard("*.example.com", "blog.example.com"));
/// assert!(!matches_wildcard("*.example.com", "notexample.com"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}

/// Decides whether a URL belongs to the crawl's target domain
///
/// Built once from the start URL's host. For an ordinary host the apex is its
/// last two labels (`www.example.com` → `example.com`) and a URL is in scope
/// when its host is the apex or a subdomain of it. When no apex can be
/// inferred (IP addresses, hosts with more than three labels, single-label
/// hosts like `localhost`) every URL is in scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainMatcher {
    /// Matches the apex and any subdomain; holds the `*.apex` pattern
    Apex(String),
    /// Matches everything
    Unrestricted,
}

impl DomainMatcher {
    /// Creates a matcher from the start URL's host
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_sitemap::url::DomainMatcher;
    ///
    /// let matcher = DomainMatcher::new("www.example.com");
    /// assert_eq!(matcher.apex(), Some("example.com"));
    /// assert!(matcher.in_scope("https://blog.example.com/post"));
    /// assert!(!matcher.in_scope("https://notexample.com/"));
    ///
    /// assert_eq!(DomainMatcher::new("127.0.0.1"), DomainMatcher::Unrestricted);
    /// ```
    pub fn new(host: &str) -> Self {
        let host = host.trim_end_matches('.').to_lowercase();

        if host.starts_with('[') || host.contains(':') {
            return Self::Unrestricted;
        }

        let dots = host.matches('.').count();
        if dots == 0 || dots > 2 {
            return Self::Unrestricted;
        }

        let mut labels = host.rsplit('.');
        match (labels.next(), labels.next()) {
            (Some(tld), Some(sld)) if !tld.is_empty() && !sld.is_empty() => {
                Self::Apex(format!("*.{}.{}", sld, tld))
            }
            _ => Self::Unrestricted,
        }
    }

    /// Returns the apex domain, or None when unrestricted
    pub fn apex(&self) -> Option<&str> {
        match self {
            Self::Apex(pattern) => pattern.strip_prefix("*."),
            Self::Unrestricted => None,
        }
    }

    /// Checks whether `candidate` is in scope
    ///
    /// The scheme is optional (`blog.example.com/x` is accepted as input);
    /// port, path, and a leading `www.` are ignored.
    pub fn in_scope(&self, candidate: &str) -> bool {
        let pattern = match self {
            Self::Unrestricted => return true,
            Self::Apex(pattern) => pattern,
        };

        match host_of(candidate) {
            Some(host) => {
                let host = host.strip_prefix("www.").unwrap_or(&host);
                matches_wildcard(pattern, host)
            }
            None => false,
        }
    }
}

/// Extracts the lowercase host from a URL string whose scheme may be missing
fn host_of(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    let parsed = if candidate.contains("://") {
        Url::parse(candidate)
    } else {
        Url::parse(&format!("http://{}", candidate))
    };

    parsed.ok().as_ref().and_then(extract_domain)
}
