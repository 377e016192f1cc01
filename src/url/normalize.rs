use crate::UrlError;
use url::Url;

/// Normalizes an absolute URL so that equivalent spellings compare equal
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an HTTP or HTTPS scheme and a host
/// 3. Lowercase scheme and host, drop default ports (done by the parser)
/// 4. Normalize path:
///    - Remove dot segments (. and ..)
///    - Collapse repeated slashes
///    - Decode percent-encoded unreserved characters, uppercase other escapes
///    - Empty path becomes /
/// 5. Remove fragment (everything after #)
/// 6. Canonicalize query escapes, remove empty query string (trailing ?)
///
/// Trailing slashes and `www.` prefixes are kept: both can name a different
/// resource on the server.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use sumi_sitemap::url::normalize_url;
///
/// let url = normalize_url("HTTP://WWW.EXAMPLE.COM:80/a/./b/../page#top").unwrap();
/// assert_eq!(url.as_str(), "http://www.example.com/a/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingDomain),
    }

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    url.set_fragment(None);

    match url.query() {
        Some("") => url.set_query(None),
        Some(query) => {
            let normalized_query = normalize_percent_encoding(query);
            url.set_query(Some(&normalized_query));
        }
        None => {}
    }

    Ok(url)
}

/// Normalizes a URL path by removing dot segments and empty segments
fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let keep_trailing_slash = path.len() > 1 && path.ends_with('/');
    let mut normalized_segments: Vec<String> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                normalized_segments.pop();
            }
            _ => normalized_segments.push(normalize_percent_encoding(segment)),
        }
    }

    if normalized_segments.is_empty() {
        return "/".to_string();
    }

    let mut result = format!("/{}", normalized_segments.join("/"));
    if keep_trailing_slash {
        result.push('/');
    }
    result
}

/// Decodes escapes of unreserved characters and uppercases the rest
///
/// `%7e` and `~` name the same resource; `%2f` and `%2F` too. Escapes of
/// reserved characters are kept since decoding them changes the URL's meaning.
fn normalize_percent_encoding(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut output = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                let decoded = hi * 16 + lo;
                if is_unreserved(decoded) {
                    output.push(decoded as char);
                } else {
                    output.push('%');
                    output.push(bytes[i + 1].to_ascii_uppercase() as char);
                    output.push(bytes[i + 2].to_ascii_uppercase() as char);
                }
                i += 3;
                continue;
            }
        }
        output.push(bytes[i] as char);
        i += 1;
    }

    output
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}
