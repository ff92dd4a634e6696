use url::Url;

/// Returns the lowercased host of `url`, if it has one
///
/// This is the `host` value sent to the notifier.
///
/// ```
/// use url::Url;
/// use sumi_notify::url::extract_domain;
///
/// let site = Url::parse("https://Blog.Example.com:8443/").unwrap();
/// assert_eq!(extract_domain(&site), Some("blog.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(str::to_ascii_lowercase)
}

/// Returns true if a canonical URL string lies at or under `origin`
///
/// The URL must equal the origin or continue it with `/` or `?`, so
/// `https://example.com.evil.com` is not under `https://example.com`.
pub fn is_within_origin(url: &str, origin: &str) -> bool {
    match url.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}
