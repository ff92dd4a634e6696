//! Sumi-Notify: IndexNow submission pipeline
//!
//! This crate pushes content-change notifications for a site to an
//! IndexNow-compatible endpoint. URLs come either from the caller or from a
//! breadth-first crawl of the site's sitemap graph, and are validated against
//! the site's origin before being submitted in bounded batches.

pub mod config;
pub mod crawler;
pub mod http;
pub mod output;
pub mod pipeline;
pub mod submit;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Notify operations
///
/// Only fatal conditions end up here. Per-batch notifier failures are
/// recorded in [`submit::SubmissionResult`] instead.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Sitemap crawl failed: {0}")]
    Crawl(#[from] CrawlError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} is required")]
    Missing(String),

    #[error("{0} must be a valid URL")]
    InvalidUrl(String),

    #[error("{0} must use https")]
    InsecureUrl(String),
}

/// Errors for malformed caller requests
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("mode must be one of created, updated, deleted (got '{0}')")]
    InvalidMode(String),

    #[error("urls must be an array")]
    UrlsNotArray,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

/// Errors that abort a sitemap crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("{0}")]
    LimitExceeded(&'static str),

    #[error("Failed to fetch sitemap {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("Failed to fetch sitemap {url}: {source}")]
    Network { url: String, source: reqwest::Error },
}

/// Result type alias for Sumi-Notify operations
pub type Result<T> = std::result::Result<T, NotifyError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlLimits, SitemapCrawler};
pub use pipeline::Pipeline;
pub use submit::{BatchSubmitter, SubmissionMode, SubmissionResult};
pub use url::{normalize_urls, NormalizedUrls};
