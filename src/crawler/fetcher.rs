//! Sitemap document fetcher
//!
//! Any failure to fetch a document is fatal for the whole crawl: a missing
//! branch of the sitemap graph would silently under-submit.

use crate::CrawlError;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::debug;

/// `Accept` header sent with every sitemap request
pub const SITEMAP_ACCEPT: &str = "application/xml,text/xml,text/plain,*/*";

/// Fetches a sitemap document and returns its body text
///
/// # Returns
///
/// * `Ok(String)` - The document body (2xx response)
/// * `Err(CrawlError::Fetch)` - Non-2xx response
/// * `Err(CrawlError::Network)` - Timeout, connection or body read failure
pub async fn fetch_sitemap(client: &Client, url: &str) -> Result<String, CrawlError> {
    debug!("Fetching sitemap: {}", url);

    let response = client
        .get(url)
        .header(ACCEPT, SITEMAP_ACCEPT)
        .send()
        .await
        .map_err(|source| CrawlError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| CrawlError::Network {
        url: url.to_string(),
        source,
    })
}
