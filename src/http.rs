//! Shared HTTP client construction
//!
//! Both the notifier submissions and the sitemap fetches go through one
//! reqwest client with a bounded per-request timeout. When the timeout
//! elapses the in-flight request is aborted and surfaces as a network error.

use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Per-request timeout for notifier POSTs and sitemap GETs
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Upper bound on a whole request, connect through body
    pub timeout: Duration,

    pub connect_timeout: Duration,

    pub user_agent: String,

    /// Refuse plain-HTTP requests (disabled only against local mock servers)
    pub https_only: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: REQUEST_TIMEOUT,
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            https_only: true,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sumi_notify::http::{build_http_client, ClientOptions};
///
/// let client = build_http_client(&ClientOptions::default()).unwrap();
/// ```
pub fn build_http_client(options: &ClientOptions) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .connect_timeout(options.connect_timeout)
        .redirect(Policy::limited(10))
        .https_only(options.https_only)
        .gzip(true)
        .brotli(true)
        .build()
}
