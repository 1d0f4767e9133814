//! Error taxonomy for client submissions.
//!
//! Every failure the submission path can hit is one of five kinds. The
//! outbound client produces these directly so the web layer never has to
//! guess a failure's origin from its shape.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for submission operations.
pub type Result<T> = std::result::Result<T, SubmissionError>;

/// Failure classes for a single submission.
#[derive(Debug, Clone, Error)]
pub enum SubmissionError {
    /// Deployment configuration is incomplete.
    #[error("configuration error: {details}")]
    Configuration {
        /// Human readable description of what is missing
        details: String,
    },

    /// Caller supplied data failed the required-field check.
    #[error("validation error: {details}")]
    Validation {
        /// What the caller needs to correct
        details: String,
    },

    /// The record store answered with a non-success status.
    #[error("airtable api error: HTTP {status}")]
    RemoteApi {
        /// Status code returned by the remote service
        status: u16,
        /// Response body, as JSON when parseable, otherwise a JSON string
        body: Value,
    },

    /// The request went out but no response came back.
    #[error("network error: {message}")]
    Network {
        /// Transport error description
        message: String,
    },

    /// Unexpected local fault.
    #[error("internal error: {message}")]
    Internal {
        /// Error description, logged but never returned to callers
        message: String,
    },
}

impl SubmissionError {
    /// Creates a configuration error.
    pub fn configuration(details: impl Into<String>) -> Self {
        Self::Configuration { details: details.into() }
    }

    /// Creates a validation error naming the missing fields.
    pub fn missing_fields(missing: &[&str]) -> Self {
        Self::Validation { details: describe_missing(missing) }
    }

    /// Creates a validation error for a body that could not be read.
    pub fn malformed_body(details: impl Into<String>) -> Self {
        Self::Validation { details: details.into() }
    }

    /// Creates a remote API error from a response.
    pub fn remote_api(status: u16, body: Value) -> Self {
        Self::RemoteApi { status, body }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Whether the caller may safely retry the same submission.
    ///
    /// Transport failures and remote 5xx responses are transient. Everything
    /// else needs the caller or the operator to change something first.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::RemoteApi { status, .. } => *status >= 500,
            Self::Configuration { .. } | Self::Validation { .. } | Self::Internal { .. } => false,
        }
    }

    /// Category string used as the `error` field of the response envelope.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "Server configuration error",
            Self::Validation { .. } => "Validation error",
            Self::RemoteApi { .. } => "Airtable API error",
            Self::Network { .. } => "Network error",
            Self::Internal { .. } => "Internal server error",
        }
    }

    /// HTTP status code the error is reported with.
    ///
    /// Remote errors mirror the remote status; anything that is not a valid
    /// error status falls back to 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::RemoteApi { status, .. } if (400..=599).contains(status) => *status,
            _ => 500,
        }
    }
}

/// Render a list of missing field names as a sentence.
fn describe_missing(missing: &[&str]) -> String {
    match missing {
        [] => "required fields are missing".to_string(),
        [one] => format!("{one} is required"),
        [init @ .., last] => format!("{} and {last} are required", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_retryable_classification() {
        assert!(SubmissionError::network("connection refused").is_retryable());
        assert!(SubmissionError::remote_api(503, json!({})).is_retryable());
        assert!(!SubmissionError::remote_api(422, json!({})).is_retryable());
        assert!(!SubmissionError::missing_fields(&["email"]).is_retryable());
        assert!(!SubmissionError::configuration("missing").is_retryable());
        assert!(!SubmissionError::internal("boom").is_retryable());
    }

    #[test]
    fn test_http_status_mirrors_remote() {
        assert_eq!(SubmissionError::remote_api(422, json!(null)).http_status(), 422);
        assert_eq!(SubmissionError::remote_api(503, json!(null)).http_status(), 503);
        assert_eq!(SubmissionError::remote_api(302, json!(null)).http_status(), 500);
        assert_eq!(SubmissionError::missing_fields(&["email"]).http_status(), 400);
        assert_eq!(SubmissionError::network("timeout").http_status(), 500);
    }

    #[test]
    fn test_describe_missing() {
        assert_eq!(describe_missing(&["email"]), "email is required");
        assert_eq!(
            describe_missing(&["clientName", "email"]),
            "clientName and email are required"
        );
    }

    #[test]
    fn test_validation_display_names_fields() {
        let err = SubmissionError::missing_fields(&["clientName"]);
        assert_eq!(err.to_string(), "validation error: clientName is required");
    }
}
