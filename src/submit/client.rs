//! Notifier client with retry and backoff
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 2xx | Batch submitted |
//! | HTTP 5xx | Retry up to `max_retries` times with exponential backoff |
//! | Timeout / connect / DNS / reset | Retry up to `max_retries` times with exponential backoff |
//! | Any other final status (4xx, ...) | Immediate terminal failure |
//! | Redirect loop or too many hops | Immediate terminal failure, recorded as `NETWORK_ERROR` |
//!
//! Redirects are followed by the shared client (see [`crate::http`]), so the
//! classification applies to the status at the end of the redirect chain.

use crate::config::Config;
use crate::submit::batch::{partition_batches, Batch, MAX_URLS_PER_BATCH};
use crate::submit::result::{
    truncate_snippet, BatchFailure, BatchOutcome, FailureStatus, SubmissionResult,
};
use crate::submit::SubmissionMode;
use crate::url::normalize_urls;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// How transient batch failures are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (so `max_retries + 1` requests at most)
    pub max_retries: u32,

    /// Delay before the first retry; doubles for each further retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Backoff to wait after failed attempt number `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// JSON body accepted by IndexNow endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotifierPayload<'a> {
    host: &'a str,
    key: &'a str,
    key_location: &'a str,
    url_list: &'a [String],
}

/// Result of a single POST
enum Attempt {
    Accepted,
    /// Non-retryable response
    Rejected { status: u16, body: String },
    /// 5xx response (`status` set) or network failure (`status` unset)
    Transient { status: Option<u16>, detail: String },
    /// Redirect chain the client refused to follow
    Unredirectable { detail: String },
}

/// Submits validated URLs to the notifier in sequential batches
#[derive(Debug, Clone)]
pub struct BatchSubmitter {
    client: Client,
    retry: RetryPolicy,
}

impl BatchSubmitter {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Normalizes `urls` against the site origin and submits the valid ones
    ///
    /// Batches are sent in ascending index order. A failed batch is logged and
    /// recorded in the result; it never stops the remaining batches.
    pub async fn submit(
        &self,
        urls: &[String],
        mode: SubmissionMode,
        config: &Config,
    ) -> SubmissionResult {
        let normalized = normalize_urls(urls, &config.site_origin);
        let batches = partition_batches(&normalized.valid, MAX_URLS_PER_BATCH);

        let mut result = SubmissionResult::new(mode);
        result.total = urls.len();
        result.valid = normalized.valid.len();
        result.invalid = normalized.invalid.len();
        result.duplicate_count = normalized.duplicates;
        result.batch_count = batches.len();

        info!(
            "Submitting {} URLs ({} invalid, {} duplicates) as '{}' in {} batches",
            result.valid,
            result.invalid,
            result.duplicate_count,
            mode,
            result.batch_count
        );

        for batch in &batches {
            let outcome = self.send_batch(batch, config).await;
            result.record(outcome);
        }

        result.invalid_urls = normalized.invalid;
        result.completed_at = Utc::now();

        info!(
            "Submission finished: {} of {} URLs accepted, {} failed batches",
            result.submitted,
            result.valid,
            result.failed_batches.len()
        );

        result
    }

    /// Sends one batch, retrying transient failures per the retry policy
    pub async fn send_batch(&self, batch: &Batch<'_>, config: &Config) -> BatchOutcome {
        let payload = NotifierPayload {
            host: &config.site_host,
            key: &config.shared_key,
            key_location: &config.key_verification_url,
            url_list: batch.urls,
        };

        let mut attempt: u32 = 0;

        loop {
            match self.post_once(&config.notifier_endpoint, &payload).await {
                Attempt::Accepted => {
                    info!(
                        batch = batch.index,
                        urls = batch.len(),
                        attempts = attempt + 1,
                        "Batch accepted"
                    );
                    return BatchOutcome::Submitted {
                        batch_index: batch.index,
                        count: batch.len(),
                    };
                }
                Attempt::Rejected { status, body } => {
                    return self.fail(batch, FailureStatus::Http(status), &body, attempt + 1);
                }
                Attempt::Unredirectable { detail } => {
                    return self.fail(batch, FailureStatus::NetworkError, &detail, attempt + 1);
                }
                Attempt::Transient { status, detail } => {
                    if attempt >= self.retry.max_retries {
                        let status = status.map_or(FailureStatus::NetworkError, FailureStatus::Http);
                        return self.fail(batch, status, &detail, attempt + 1);
                    }

                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        batch = batch.index,
                        attempt = attempt + 1,
                        status = ?status,
                        error = %truncate_snippet(&detail),
                        "Batch failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// POSTs once and classifies the response
    async fn post_once(&self, endpoint: &str, payload: &NotifierPayload<'_>) -> Attempt {
        debug!(endpoint, urls = payload.url_list.len(), "Posting batch");

        let response = match self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_redirect() => {
                return Attempt::Unredirectable {
                    detail: describe_network_error(&e),
                }
            }
            Err(e) => {
                return Attempt::Transient {
                    status: None,
                    detail: describe_network_error(&e),
                }
            }
        };

        let status = response.status();
        if status.is_success() {
            return Attempt::Accepted;
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read response body: {}>", e));

        if status.is_server_error() {
            Attempt::Transient {
                status: Some(status.as_u16()),
                detail: body,
            }
        } else {
            Attempt::Rejected {
                status: status.as_u16(),
                body,
            }
        }
    }

    fn fail(
        &self,
        batch: &Batch<'_>,
        status: FailureStatus,
        detail: &str,
        attempts: u32,
    ) -> BatchOutcome {
        let failure = BatchFailure {
            batch_index: batch.index,
            status,
            error_snippet: truncate_snippet(detail),
            attempts,
            url_count: batch.len(),
        };

        error!(
            batch = failure.batch_index,
            status = %failure.status,
            attempts = failure.attempts,
            urls = failure.url_count,
            error = %failure.error_snippet,
            "Batch submission failed"
        );

        BatchOutcome::Failed(failure)
    }
}

/// Classifies a transport error into a short human-readable message
fn describe_network_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timeout: {}", e)
    } else if e.is_redirect() {
        format!("Redirect not followed: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}
