//! HTTP endpoint handlers.
//!
//! The submission handler is a thin adapter: it extracts the body, hands it
//! to [`crate::submission::submit_client`], and lets the response types
//! render the outcome.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::airtable::RecordStore;
use crate::error::SubmissionError;
use crate::submission::{self, ClientSubmission};
use crate::web::response::SubmitResponse;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when Airtable configuration was incomplete at startup.
    pub store: Option<Arc<dyn RecordStore>>,
}

impl AppState {
    pub fn new(config: Config, store: Option<Arc<dyn RecordStore>>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Client Submission
// =============================================================================

/// Client onboarding submission endpoint.
///
/// Body rejections are reported through the same validation envelope as
/// missing fields, after the configuration check.
pub async fn submit_client(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmitResponse>, SubmissionError> {
    // Configuration is reported ahead of anything about the body
    if let Err(e) = submission::require_store(state.store.as_deref()) {
        warn!(error = %e, "submission_rejected_unconfigured");
        return Err(e);
    }

    let Json(body) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "submission_body_rejected");
        SubmissionError::malformed_body(rejection.body_text())
    })?;

    let submission = ClientSubmission::from_json(body).map_err(|e| {
        warn!(error = %e, "submission_body_rejected");
        e
    })?;

    info!(
        has_client_name = submission.client_name.is_some(),
        has_email = submission.email.is_some(),
        "submission_received"
    );

    match submission::submit_client(state.store.as_deref(), submission).await {
        Ok(confirmation) => {
            info!(record_id = %confirmation.record_id, "submission_succeeded");
            Ok(Json(SubmitResponse::from(confirmation)))
        }
        Err(e) => {
            match &e {
                SubmissionError::Internal { message } => {
                    error!(error = %message, "submission_internal_error");
                }
                other => {
                    warn!(
                        category = other.category(),
                        status = other.http_status(),
                        retryable = other.is_retryable(),
                        error = %other,
                        "submission_failed"
                    );
                }
            }
            Err(e)
        }
    }
}
