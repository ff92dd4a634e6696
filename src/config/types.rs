use serde::Deserialize;

/// Public IndexNow endpoint used when `INDEXNOW_ENDPOINT` is not set
pub const DEFAULT_NOTIFIER_ENDPOINT: &str = "https://api.indexnow.org/indexnow";

/// Validated operating configuration
///
/// Built once per top-level operation and never mutated afterwards. Every URL
/// field is an absolute HTTPS URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Site origin without trailing slash or fragment (e.g. `https://example.com`)
    pub site_origin: String,

    /// Bare hostname of the origin, sent to the notifier as `host`
    pub site_host: String,

    /// IndexNow key proving ownership of the origin
    pub shared_key: String,

    /// Where the notifier can fetch the key (`keyLocation`)
    pub key_verification_url: String,

    /// Submission API endpoint
    pub notifier_endpoint: String,

    /// Root sitemap document
    pub sitemap_entry_url: String,
}

/// Optional TOML settings file
///
/// Mirrors the environment keys. Environment values take precedence when both
/// are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    #[serde(rename = "site-url")]
    pub site_url: Option<String>,

    #[serde(rename = "indexnow-key")]
    pub indexnow_key: Option<String>,

    #[serde(rename = "indexnow-key-location")]
    pub indexnow_key_location: Option<String>,

    #[serde(rename = "indexnow-endpoint")]
    pub indexnow_endpoint: Option<String>,

    #[serde(rename = "sitemap-url")]
    pub sitemap_url: Option<String>,
}
