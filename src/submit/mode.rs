use crate::ValidationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Nature of the content change being announced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    /// New pages were published
    Created,

    /// Existing pages changed
    #[default]
    Updated,

    /// Pages were removed
    Deleted,
}

impl SubmissionMode {
    /// All accepted modes
    pub const ALL: [SubmissionMode; 3] = [Self::Created, Self::Updated, Self::Deleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }

    /// Parses an optional caller-supplied mode, defaulting to `updated`
    pub fn parse_optional(value: Option<&str>) -> Result<Self, ValidationError> {
        value.map_or(Ok(Self::default()), str::parse)
    }
}

impl FromStr for SubmissionMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "deleted" => Ok(Self::Deleted),
            other => Err(ValidationError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
