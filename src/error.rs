use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobsError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, JobsError>;

/// Per-record observations. None of these abort a run.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordIssue {
    /// Source text absent or a "not applicable" sentinel
    #[error("missing field: {field}")]
    MissingField { field: String },

    /// Source text present but no numeric or keyword token matched
    #[error("unparsable {field}: {text:?}")]
    UnparsableText { field: String, text: String },

    /// Row lacks a required raw column entirely and is rejected
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}

impl RecordIssue {
    pub fn missing(field: &str) -> Self {
        RecordIssue::MissingField {
            field: field.to_string(),
        }
    }

    pub fn unparsable(field: &str, text: &str) -> Self {
        RecordIssue::UnparsableText {
            field: field.to_string(),
            text: text.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RecordIssue::MissingField { .. } => "missing_field",
            RecordIssue::UnparsableText { .. } => "unparsable_text",
            RecordIssue::MalformedRow { .. } => "malformed_row",
        }
    }
}
