//! Human-readable submission summaries

use crate::submit::SubmissionResult;

/// Formats a submission result as a plain-text report
pub fn render_summary(result: &SubmissionResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== IndexNow Submission ({}) ===\n\n", result.mode));

    out.push_str("URLs:\n");
    out.push_str(&format!("  Candidates: {}\n", result.total));
    out.push_str(&format!("  Valid: {}\n", result.valid));
    out.push_str(&format!("  Invalid: {}\n", result.invalid));
    out.push_str(&format!("  Duplicates dropped: {}\n\n", result.duplicate_count));

    out.push_str("Batches:\n");
    out.push_str(&format!("  Total: {}\n", result.batch_count));
    out.push_str(&format!("  Successful: {}\n", result.successful_batches));
    out.push_str(&format!("  Failed: {}\n\n", result.failed_batches.len()));

    if !result.failed_batches.is_empty() {
        out.push_str("Failed Batches:\n");
        for failure in &result.failed_batches {
            out.push_str(&format!(
                "  - #{} ({} URLs, {} attempts): {} {}\n",
                failure.batch_index,
                failure.url_count,
                failure.attempts,
                failure.status,
                failure.error_snippet
            ));
        }
        out.push('\n');
    }

    if !result.invalid_urls.is_empty() {
        out.push_str(&format!("Invalid URLs ({}):\n", result.invalid_urls.len()));
        for url in &result.invalid_urls {
            out.push_str(&format!("  - {:?}\n", url));
        }
        out.push('\n');
    }

    let rate = if result.valid > 0 {
        (result.submitted as f64 / result.valid as f64) * 100.0
    } else {
        0.0
    };

    out.push_str(&format!(
        "Submitted: {} / {} valid URLs ({:.1}%) at {}\n",
        result.submitted,
        result.valid,
        rate,
        result.completed_at.to_rfc3339()
    ));

    out
}
