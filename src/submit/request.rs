//! Validation of caller-supplied submission requests
//!
//! The HTTP layer that receives `{ "urls": [...], "mode": "..." }` bodies is
//! not part of this crate; it hands the decoded JSON to
//! [`SubmitRequest::from_json`] and gets a typed request or a
//! [`ValidationError`] back before any network activity happens.

use crate::submit::SubmissionMode;
use crate::ValidationError;
use serde_json::Value;

/// A validated "submit these URLs" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Raw candidates; non-string entries are carried as empty strings so
    /// they land in the invalid bucket during normalization
    pub urls: Vec<String>,

    pub mode: SubmissionMode,
}

impl SubmitRequest {
    /// Validates the request shape
    ///
    /// # Errors
    ///
    /// * `MalformedRequest` - the body is not a JSON object
    /// * `UrlsNotArray` - `urls` is missing or not an array
    /// * `InvalidMode` - `mode` is present but not one of the three modes
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use sumi_notify::submit::{SubmitRequest, SubmissionMode};
    ///
    /// let request = SubmitRequest::from_json(&json!({
    ///     "urls": ["https://example.com/a", 42],
    ///     "mode": "created",
    /// }))
    /// .unwrap();
    /// assert_eq!(request.urls, vec!["https://example.com/a", ""]);
    /// assert_eq!(request.mode, SubmissionMode::Created);
    /// ```
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let object = body.as_object().ok_or_else(|| {
            ValidationError::MalformedRequest("request body must be a JSON object".to_string())
        })?;

        let urls = object
            .get("urls")
            .and_then(Value::as_array)
            .ok_or(ValidationError::UrlsNotArray)?
            .iter()
            .map(|value| value.as_str().unwrap_or_default().to_string())
            .collect();

        let mode = match object.get("mode") {
            None | Some(Value::Null) => SubmissionMode::default(),
            Some(Value::String(mode)) => mode.parse()?,
            Some(other) => return Err(ValidationError::InvalidMode(other.to_string())),
        };

        Ok(Self { urls, mode })
    }
}
