//! Reqwest-backed Airtable record store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{error, info};
use url::Url;

use crate::airtable::RecordStore;
use crate::config::AirtableSettings;
use crate::error::{Result, SubmissionError};
use crate::submission::{CreateRecordRequest, CreatedRecord, RecordFields};

/// Airtable REST client bound to a single base and table.
#[derive(Clone)]
pub struct AirtableClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    timeout: Duration,
}

impl std::fmt::Debug for AirtableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl AirtableClient {
    /// Build a client for the configured base and table.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::Configuration` if the API URL cannot be
    /// parsed or the HTTP client cannot be built.
    pub fn new(settings: AirtableSettings) -> Result<Self> {
        let endpoint = record_endpoint(&settings.api_url, &settings.base_id, &settings.table_name)?;

        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| {
                SubmissionError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: settings.api_key,
            timeout: settings.timeout,
        })
    }

    /// Record-creation URL this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RecordStore for AirtableClient {
    async fn create_record(&self, fields: &RecordFields) -> Result<CreatedRecord> {
        let body = serde_json::to_vec(&CreateRecordRequest { fields })
            .map_err(|e| SubmissionError::internal(format!("failed to serialize record: {e}")))?;

        info!(
            url = %self.endpoint,
            body_length = body.len(),
            timeout_seconds = self.timeout.as_secs_f64(),
            "airtable_request_starting"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| classify_send_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(status_code = status.as_u16(), error = %e, "airtable_response_read_failed");
            body_read_error(status)
        })?;

        if !status.is_success() {
            let body = parse_body(&text);
            error!(
                status_code = status.as_u16(),
                response = %body,
                "airtable_api_error"
            );
            return Err(SubmissionError::remote_api(status.as_u16(), body));
        }

        let raw: Value = serde_json::from_str(&text).map_err(|e| {
            SubmissionError::internal(format!("Airtable acknowledgment is not JSON: {e}"))
        })?;

        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| SubmissionError::internal("Airtable acknowledgment has no record id"))?
            .to_string();

        info!(
            status_code = status.as_u16(),
            record_id = %id,
            "airtable_record_created"
        );

        Ok(CreatedRecord { id, raw })
    }
}

/// Build `{api_url}/{base_id}/{table_name}` with encoded path segments.
fn record_endpoint(api_url: &str, base_id: &str, table_name: &str) -> Result<Url> {
    let mut url = Url::parse(api_url).map_err(|e| {
        SubmissionError::configuration(format!("invalid Airtable API URL {api_url:?}: {e}"))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            SubmissionError::configuration(format!("Airtable API URL {api_url:?} cannot be a base"))
        })?
        .pop_if_empty()
        .push(base_id)
        .push(table_name);

    Ok(url)
}

/// Map a send failure onto the error taxonomy.
///
/// A failure to build the request is a local fault; anything after that
/// means the request left but no response arrived.
fn classify_send_error(e: &reqwest::Error) -> SubmissionError {
    if e.is_builder() {
        error!(error = %e, "airtable_request_build_failed");
        return SubmissionError::internal(format!("failed to build Airtable request: {e}"));
    }

    let reason = if e.is_timeout() {
        error!(error = %e, "airtable_request_timeout");
        "request timed out"
    } else if e.is_connect() {
        error!(error = %e, "airtable_request_connect_error");
        "connection failed"
    } else {
        error!(error = %e, "airtable_request_failed");
        "request failed"
    };

    SubmissionError::network(format!("Unable to reach Airtable API: {reason}"))
}

/// Classify a failure to read the response body.
///
/// Once an error status has arrived it is reported as such, with no body.
/// A success status whose body is lost stays a transport failure.
fn body_read_error(status: StatusCode) -> SubmissionError {
    if status.is_success() {
        SubmissionError::network("Unable to reach Airtable API: response body could not be read")
    } else {
        SubmissionError::remote_api(status.as_u16(), Value::Null)
    }
}

/// Parse a response body as JSON, keeping it as a string otherwise.
fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
