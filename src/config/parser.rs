use crate::config::source::ConfigSource;
use crate::config::types::{Config, SettingsFile, DEFAULT_NOTIFIER_ENDPOINT};
use crate::config::validation::{normalize_origin, require_https_url, require_value};
use crate::url::extract_domain;
use crate::ConfigError;
use std::path::Path;

pub const SITE_URL: &str = "SITE_URL";
pub const INDEXNOW_KEY: &str = "INDEXNOW_KEY";
pub const INDEXNOW_API_KEY: &str = "INDEXNOW_API_KEY";
pub const INDEXNOW_KEY_LOCATION: &str = "INDEXNOW_KEY_LOCATION";
pub const INDEXNOW_ENDPOINT: &str = "INDEXNOW_ENDPOINT";
pub const SITEMAP_URL: &str = "SITEMAP_URL";

/// Keys captured from the process environment
pub const RECOGNIZED_KEYS: &[&str] = &[
    SITE_URL,
    INDEXNOW_KEY,
    INDEXNOW_API_KEY,
    INDEXNOW_KEY_LOCATION,
    INDEXNOW_ENDPOINT,
    SITEMAP_URL,
];

/// Loads the configuration from the process environment
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - A required value is missing or a URL is malformed
///
/// # Example
///
/// ```no_run
/// use sumi_notify::config::load_config;
///
/// let config = load_config().unwrap();
/// println!("Notifier: {}", config.notifier_endpoint);
/// ```
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&ConfigSource::from_env())
}

/// Builds a validated configuration from an explicit key/value source
///
/// Fails fast on the first invalid value; no partial configuration is ever
/// returned.
///
/// # Example
///
/// ```
/// use sumi_notify::config::{load_config_from, ConfigSource};
///
/// let source = ConfigSource::from_pairs([
///     ("SITE_URL", "https://example.com/"),
///     ("INDEXNOW_KEY", "abc123"),
/// ]);
/// let config = load_config_from(&source).unwrap();
/// assert_eq!(config.site_origin, "https://example.com");
/// assert_eq!(config.key_verification_url, "https://example.com/abc123.txt");
/// assert_eq!(config.sitemap_entry_url, "https://example.com/sitemap.xml");
/// ```
pub fn load_config_from(source: &ConfigSource) -> Result<Config, ConfigError> {
    let site_url = require_value(SITE_URL, source.get(SITE_URL))?;
    let site = require_https_url(SITE_URL, site_url)?;
    let site_host = extract_domain(&site).ok_or_else(|| ConfigError::InvalidUrl(SITE_URL.to_string()))?;
    let site_origin = normalize_origin(site);

    let shared_key = require_value(
        INDEXNOW_KEY,
        source.get(INDEXNOW_KEY).or_else(|| source.get(INDEXNOW_API_KEY)),
    )?
    .to_string();

    let key_verification_url = resolve_url(
        source,
        INDEXNOW_KEY_LOCATION,
        format!("{}/{}.txt", site_origin, shared_key),
    )?;
    let notifier_endpoint = resolve_url(
        source,
        INDEXNOW_ENDPOINT,
        DEFAULT_NOTIFIER_ENDPOINT.to_string(),
    )?;
    let sitemap_entry_url = resolve_url(source, SITEMAP_URL, format!("{}/sitemap.xml", site_origin))?;

    Ok(Config {
        site_origin,
        site_host,
        shared_key,
        key_verification_url,
        notifier_endpoint,
        sitemap_entry_url,
    })
}

/// Uses the explicit override for `key` if set, otherwise `default`, and
/// validates the result as an HTTPS URL
fn resolve_url(source: &ConfigSource, key: &str, default: String) -> Result<String, ConfigError> {
    let value = source.get(key).map(str::to_string).unwrap_or(default);
    require_https_url(key, &value)?;
    Ok(value)
}

/// Reads a TOML settings file into a key/value source
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(ConfigSource)` - The values present in the file
/// * `Err(ConfigError)` - Failed to read or parse the file
pub fn load_settings_file(path: &Path) -> Result<ConfigSource, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let settings: SettingsFile = toml::from_str(&content)?;
    Ok(settings.into())
}

impl From<SettingsFile> for ConfigSource {
    fn from(settings: SettingsFile) -> Self {
        let mut source = ConfigSource::new();
        let entries = [
            (SITE_URL, settings.site_url),
            (INDEXNOW_KEY, settings.indexnow_key),
            (INDEXNOW_KEY_LOCATION, settings.indexnow_key_location),
            (INDEXNOW_ENDPOINT, settings.indexnow_endpoint),
            (SITEMAP_URL, settings.sitemap_url),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                source.set(key, value);
            }
        }
        source
    }
}
