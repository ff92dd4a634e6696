use crate::ConfigError;
use url::Url;

/// Parses `value` as an absolute HTTPS URL
///
/// `key` names the setting in error messages, e.g. `SITE_URL must use https`.
pub fn require_https_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|_| ConfigError::InvalidUrl(key.to_string()))?;

    if url.scheme() != "https" {
        return Err(ConfigError::InsecureUrl(key.to_string()));
    }

    // Absolute https URLs always carry a host, but reject anything odd anyway
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(key.to_string()));
    }

    Ok(url)
}

/// Serializes a site origin without fragment or trailing slash
pub fn normalize_origin(mut url: Url) -> String {
    url.set_fragment(None);
    url.as_str().trim_end_matches('/').to_string()
}

/// Returns the trimmed value, or `Missing(key)` when absent or blank
pub fn require_value<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::Missing(key.to_string()))
}
