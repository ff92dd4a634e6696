//! Integration tests for Sumi-Notify
//!
//! These tests use wiremock to stand in for the IndexNow endpoint and for
//! sitemap hosts, and exercise submission, crawling and the orchestrator
//! end-to-end.

mod pipeline_tests;

use std::time::Duration;
use sumi_notify::config::Config;
use sumi_notify::http::{build_http_client, ClientOptions};
use sumi_notify::submit::RetryPolicy;

/// Builds a client that may talk plain HTTP to the local mock server
pub fn test_client() -> reqwest::Client {
    test_client_with_timeout(Duration::from_secs(5))
}

pub fn test_client_with_timeout(timeout: Duration) -> reqwest::Client {
    build_http_client(&ClientOptions {
        timeout,
        https_only: false,
        ..ClientOptions::default()
    })
    .expect("Failed to build test client")
}

/// Same retry budget as production, with millisecond backoff
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(10),
    }
}

/// Configuration for `https://example.com` pointing at mock endpoints
pub fn test_config(notifier_endpoint: &str, sitemap_entry_url: &str) -> Config {
    Config {
        site_origin: "https://example.com".to_string(),
        site_host: "example.com".to_string(),
        shared_key: "abc123".to_string(),
        key_verification_url: "https://example.com/abc123.txt".to_string(),
        notifier_endpoint: notifier_endpoint.to_string(),
        sitemap_entry_url: sitemap_entry_url.to_string(),
    }
}

/// Wraps `<loc>` entries in a `<urlset>` document
pub fn urlset(locs: &[&str]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <url><loc>{}</loc></url>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

/// Wraps `<loc>` entries in a `<sitemapindex>` document
pub fn sitemap_index(locs: &[&str]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <sitemap><loc>{}</loc></sitemap>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    )
}

pub fn page_urls(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://example.com/page/{}", i)).collect()
}
