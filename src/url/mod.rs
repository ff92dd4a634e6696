//! URL handling module for Sumi-Notify
//!
//! This module canonicalizes candidate URLs, checks them against the site's
//! origin, and deduplicates them ahead of submission.

mod domain;
mod normalize;

use serde::Serialize;

// Re-export main functions
pub use domain::{extract_domain, is_within_origin};
pub use normalize::{canonicalize, normalize_urls};

/// Output of [`normalize_urls`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedUrls {
    /// Same-origin HTTPS URLs in first-seen order, without duplicates
    pub valid: Vec<String>,

    /// Rejected candidates, in input order
    pub invalid: Vec<String>,

    /// Number of would-be-valid entries dropped as repeats
    pub duplicates: usize,
}

impl NormalizedUrls {
    /// Total number of candidates that were examined
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len() + self.duplicates
    }
}
