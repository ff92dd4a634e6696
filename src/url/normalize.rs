use crate::url::domain::is_within_origin;
use crate::url::NormalizedUrls;
use std::collections::HashSet;
use url::Url;

/// Canonicalizes a candidate URL string
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; blank input is rejected
/// 2. Parse as an absolute URL; reject if malformed or relative
/// 3. Remove fragment (everything after #)
///
/// The remaining canonicalization (lowercased scheme and host, default port
/// removal, percent-encoding, empty path becoming `/`) is what the `url`
/// crate applies on serialization.
///
/// # Examples
///
/// ```
/// use sumi_notify::url::canonicalize;
///
/// let url = canonicalize("  HTTPS://EXAMPLE.COM/page#section ").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
///
/// assert!(canonicalize("/relative/path").is_none());
/// ```
pub fn canonicalize(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut url = Url::parse(trimmed).ok()?;
    url.set_fragment(None);
    Some(url)
}

/// Splits raw candidate URLs into a deduplicated same-origin set and rejects
///
/// Candidates are processed in input order:
///
/// 1. Blank values are invalid (recorded as given)
/// 2. Unparseable values are invalid (recorded trimmed)
/// 3. The fragment is stripped and the URL re-serialized
/// 4. Non-HTTPS or off-origin URLs are invalid (recorded normalized)
/// 5. Remaining URLs are kept on first occurrence; repeats are dropped and
///    counted in `duplicates`, never in `invalid`
///
/// This never fails and performs no I/O.
///
/// # Examples
///
/// ```
/// use sumi_notify::url::normalize_urls;
///
/// let raw = vec![
///     "https://example.com/a".to_string(),
///     "https://example.com/a#frag".to_string(),
///     "https://other.com/b".to_string(),
///     "not a url".to_string(),
/// ];
/// let result = normalize_urls(&raw, "https://example.com");
/// assert_eq!(result.valid, vec!["https://example.com/a"]);
/// assert_eq!(result.invalid, vec!["https://other.com/b", "not a url"]);
/// assert_eq!(result.duplicates, 1);
/// ```
pub fn normalize_urls(raw_urls: &[String], site_origin: &str) -> NormalizedUrls {
    let mut result = NormalizedUrls::default();
    let mut seen: HashSet<String> = HashSet::new();

    for raw in raw_urls {
        if raw.trim().is_empty() {
            result.invalid.push(raw.clone());
            continue;
        }

        let url = match canonicalize(raw) {
            Some(url) => url,
            None => {
                result.invalid.push(raw.trim().to_string());
                continue;
            }
        };

        let normalized = url.to_string();
        if url.scheme() != "https" || !is_within_origin(&normalized, site_origin) {
            result.invalid.push(normalized);
            continue;
        }

        if seen.insert(normalized.clone()) {
            result.valid.push(normalized);
        } else {
            result.duplicates += 1;
        }
    }

    result
}
