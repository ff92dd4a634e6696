//! Batch outcomes and the aggregate submission result

use crate::submit::SubmissionMode;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Maximum length (in characters) of a recorded error snippet
pub const MAX_SNIPPET_CHARS: usize = 300;

/// Marker recorded when a batch failed without an HTTP response
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";

/// What ended a failed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStatus {
    /// Last HTTP status received from the notifier
    Http(u16),

    /// Timeout, DNS failure, connection reset, etc.
    NetworkError,
}

impl Serialize for FailureStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Http(status) => serializer.serialize_u16(*status),
            Self::NetworkError => serializer.serialize_str(NETWORK_ERROR),
        }
    }
}

impl std::fmt::Display for FailureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(status) => write!(f, "HTTP {}", status),
            Self::NetworkError => f.write_str(NETWORK_ERROR),
        }
    }
}

/// A batch that was not accepted by the notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub batch_index: usize,
    pub status: FailureStatus,
    /// Response body or error message, at most [`MAX_SNIPPET_CHARS`] characters
    pub error_snippet: String,
    /// Number of requests sent for this batch
    pub attempts: u32,
    /// Number of URLs in the batch
    pub url_count: usize,
}

/// Terminal state of one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Submitted { batch_index: usize, count: usize },
    Failed(BatchFailure),
}

/// Aggregate result of a submission run
///
/// Returned to the caller and never persisted. Partial failure is reported
/// through `failed_batches` rather than as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub mode: SubmissionMode,
    /// Number of candidate URLs received
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub duplicate_count: usize,
    /// URLs accepted by the notifier
    pub submitted: usize,
    pub batch_count: usize,
    pub successful_batches: usize,
    pub failed_batches: Vec<BatchFailure>,
    pub invalid_urls: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl SubmissionResult {
    /// Creates an empty result for `mode`
    pub fn new(mode: SubmissionMode) -> Self {
        Self {
            mode,
            total: 0,
            valid: 0,
            invalid: 0,
            duplicate_count: 0,
            submitted: 0,
            batch_count: 0,
            successful_batches: 0,
            failed_batches: Vec::new(),
            invalid_urls: Vec::new(),
            completed_at: Utc::now(),
        }
    }

    /// Folds one batch outcome into the totals
    pub fn record(&mut self, outcome: BatchOutcome) {
        match outcome {
            BatchOutcome::Submitted { count, .. } => {
                self.submitted += count;
                self.successful_batches += 1;
            }
            BatchOutcome::Failed(failure) => self.failed_batches.push(failure),
        }
    }

    /// Returns true if any batch failed
    pub fn has_failures(&self) -> bool {
        !self.failed_batches.is_empty()
    }
}

/// Truncates `text` to at most [`MAX_SNIPPET_CHARS`] characters
pub fn truncate_snippet(text: &str) -> String {
    text.trim().chars().take(MAX_SNIPPET_CHARS).collect()
}
