//! Response envelopes for the submission endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::SubmissionError;
use crate::submission::Confirmation;

/// Details returned in place of internal error messages.
const INTERNAL_ERROR_DETAILS: &str = "An unexpected error occurred";

/// Successful submission body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub message: &'static str,
    pub data: Value,
    pub record_id: String,
}

impl From<Confirmation> for SubmitResponse {
    fn from(confirmation: Confirmation) -> Self {
        SubmitResponse {
            message: "Submission successful",
            data: confirmation.data,
            record_id: confirmation.record_id,
        }
    }
}

/// Error envelope shared by every failure class.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub details: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&SubmissionError> for ErrorResponse {
    fn from(err: &SubmissionError) -> Self {
        let (details, status) = match err {
            SubmissionError::Configuration { details } | SubmissionError::Validation { details } => {
                (Value::String(details.clone()), None)
            }
            SubmissionError::RemoteApi { status, body } => (body.clone(), Some(*status)),
            SubmissionError::Network { message } => (Value::String(message.clone()), None),
            SubmissionError::Internal { .. } => {
                (Value::String(INTERNAL_ERROR_DETAILS.to_string()), None)
            }
        };

        ErrorResponse {
            error: err.category(),
            details,
            status,
        }
    }
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_body_shape() {
        let body = SubmitResponse::from(Confirmation {
            record_id: "rec123".to_string(),
            data: json!({ "id": "rec123" }),
        });

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "message": "Submission successful",
                "data": { "id": "rec123" },
                "recordId": "rec123"
            })
        );
    }

    #[test]
    fn test_remote_error_envelope_carries_status() {
        let err = SubmissionError::remote_api(422, json!({ "error": { "type": "INVALID" } }));

        assert_eq!(
            serde_json::to_value(ErrorResponse::from(&err)).unwrap(),
            json!({
                "error": "Airtable API error",
                "details": { "error": { "type": "INVALID" } },
                "status": 422
            })
        );
    }

    #[test]
    fn test_internal_error_details_are_generic() {
        let err = SubmissionError::internal("serializer exploded at byte 12");
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["details"], INTERNAL_ERROR_DETAILS);
        assert!(body.get("status").is_none());
    }

    #[test]
    fn test_into_response_status() {
        assert_eq!(
            SubmissionError::remote_api(404, json!(null)).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SubmissionError::missing_fields(&["email"]).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SubmissionError::configuration("missing").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
