//! Web server module for the client intake endpoint.
//!
//! This module provides:
//! - `POST /api/submit-client`: validate and forward a client submission
//! - `GET /health`: liveness probe
//!
//! Every failure is rendered as a JSON envelope; nothing escapes the handler
//! as a bare framework error.

pub mod handlers;
pub mod response;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use handlers::{health, submit_client, AppState, HealthResponse};
pub use response::{ErrorResponse, SubmitResponse};

/// Path of the submission endpoint.
pub const SUBMIT_CLIENT_PATH: &str = "/api/submit-client";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_allowed_origins.as_deref());

    Router::new()
        .route("/health", get(health))
        .route(SUBMIT_CLIENT_PATH, post(submit_client))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS policy.
///
/// Without an allowlist any origin is accepted and requested headers are
/// mirrored back. With one, only listed origins and the JSON headers pass.
fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let (origin, headers) = match allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "cors_origin_invalid");
                        None
                    }
                })
                .collect();
            (
                AllowOrigin::list(values),
                AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]),
            )
        }
        _ => (AllowOrigin::any(), AllowHeaders::mirror_request()),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(headers)
}
