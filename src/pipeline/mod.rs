//! Submission orchestrator
//!
//! Composes the config loader, URL normalizer, batch submitter and sitemap
//! crawler into the caller-facing operations:
//! - Submit an explicit list of URLs
//! - Submit every URL published in the site's sitemap
//! - Expose and verify the IndexNow key
//!
//! Configuration is loaded fresh for every operation and never shared
//! between calls.

mod key;

pub use key::KeyCheck;

use crate::config::ConfigProvider;
use crate::crawler::{CrawlLimits, SitemapCrawler};
use crate::submit::{BatchSubmitter, RetryPolicy, SubmissionMode, SubmitRequest, SubmissionResult};
use crate::Result;
use reqwest::Client;
use serde_json::Value;
use tracing::info;

/// Entry point for the submission use cases
#[derive(Debug, Clone)]
pub struct Pipeline<P> {
    provider: P,
    client: Client,
    retry: RetryPolicy,
    limits: CrawlLimits,
}

impl<P: ConfigProvider> Pipeline<P> {
    /// Creates a pipeline that loads its configuration from `provider`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sumi_notify::config::EnvProvider;
    /// use sumi_notify::http::{build_http_client, ClientOptions};
    /// use sumi_notify::Pipeline;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = build_http_client(&ClientOptions::default())?;
    /// let pipeline = Pipeline::new(EnvProvider::new(), client);
    /// let result = pipeline.submit_entire_sitemap().await?;
    /// println!("{} URLs submitted", result.submitted);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(provider: P, client: Client) -> Self {
        Self {
            provider,
            client,
            retry: RetryPolicy::default(),
            limits: CrawlLimits::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_crawl_limits(mut self, limits: CrawlLimits) -> Self {
        self.limits = limits;
        self
    }

    fn submitter(&self) -> BatchSubmitter {
        BatchSubmitter::new(self.client.clone()).with_retry_policy(self.retry)
    }

    fn crawler(&self) -> SitemapCrawler {
        SitemapCrawler::new(self.client.clone()).with_limits(self.limits)
    }

    /// Submits caller-supplied URLs
    ///
    /// `mode` defaults to `updated` when absent. Configuration and mode errors
    /// are returned before any network activity; per-batch notifier failures
    /// are reported in the result.
    pub async fn submit_explicit_urls(
        &self,
        raw_urls: &[String],
        mode: Option<&str>,
    ) -> Result<SubmissionResult> {
        let config = self.provider.load()?;
        let mode = SubmissionMode::parse_optional(mode)?;

        Ok(self.submitter().submit(raw_urls, mode, &config).await)
    }

    /// Validates a JSON request body (`{ "urls": [...], "mode": "..." }`) and
    /// submits it
    pub async fn submit_request(&self, body: &Value) -> Result<SubmissionResult> {
        let config = self.provider.load()?;
        let request = SubmitRequest::from_json(body)?;

        Ok(self
            .submitter()
            .submit(&request.urls, request.mode, &config)
            .await)
    }

    /// Crawls the configured sitemap and returns the discovered URLs without
    /// submitting anything
    pub async fn discover_sitemap_urls(&self) -> Result<Vec<String>> {
        let config = self.provider.load()?;
        Ok(self.crawler().crawl(&config.sitemap_entry_url).await?)
    }

    /// Crawls the configured sitemap and submits everything as `updated`
    ///
    /// A crawl failure aborts the operation before any batch is sent.
    pub async fn submit_entire_sitemap(&self) -> Result<SubmissionResult> {
        let config = self.provider.load()?;
        let urls = self.crawler().crawl(&config.sitemap_entry_url).await?;

        info!(
            "Discovered {} URLs in sitemap {}",
            urls.len(),
            config.sitemap_entry_url
        );

        Ok(self
            .submitter()
            .submit(&urls, SubmissionMode::Updated, &config)
            .await)
    }

    /// Returns the raw IndexNow key served at the key location
    pub fn shared_key(&self) -> Result<String> {
        Ok(self.provider.load()?.shared_key)
    }

    /// Fetches the key location and checks it serves the configured key
    pub async fn verify_key_location(&self) -> Result<KeyCheck> {
        let config = self.provider.load()?;
        key::verify_key_location(&self.client, &config).await
    }
}
