//! Batch submission to the IndexNow notifier
//!
//! This module contains:
//! - The submission mode enumeration
//! - Partitioning of validated URLs into batches of at most 1000
//! - The notifier client with timeout, retry and backoff
//! - Per-batch outcomes and the aggregate submission result
//! - Validation of caller-supplied request bodies

mod batch;
mod client;
mod mode;
mod request;
mod result;

pub use batch::{partition_batches, Batch, MAX_URLS_PER_BATCH};
pub use client::{BatchSubmitter, RetryPolicy};
pub use mode::SubmissionMode;
pub use request::SubmitRequest;
pub use result::{
    truncate_snippet, BatchFailure, BatchOutcome, FailureStatus, SubmissionResult,
    MAX_SNIPPET_CHARS, NETWORK_ERROR,
};
