//! Output module for presenting submission results
//!
//! This module handles:
//! - Human-readable summaries of submission runs
//! - JSON rendering for callers that consume results programmatically

mod json;
mod summary;

pub use json::{render_json, OutputFormat};
pub use summary::render_summary;

use crate::submit::SubmissionResult;

/// Renders a result in the requested format
pub fn render(result: &SubmissionResult, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_summary(result)),
        OutputFormat::Json => render_json(result),
    }
}
