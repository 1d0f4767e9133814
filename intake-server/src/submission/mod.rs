//! Client submission handling.
//!
//! ## Processing Flow
//!
//! ```text
//! ClientSubmission → validate → RecordFields → RecordStore::create_record → Confirmation
//! ```
//!
//! Each call is independent. Nothing is retried and nothing is deduplicated,
//! so two identical submissions create two records.

pub mod types;

use tracing::{info, warn};

use crate::airtable::RecordStore;
use crate::error::{Result, SubmissionError};

pub use types::{ClientSubmission, Confirmation, CreateRecordRequest, CreatedRecord, RecordFields};

/// Validate a submission and forward it to the record store.
///
/// `store` is `None` when the process started without complete Airtable
/// configuration; that is reported before the input is even looked at.
pub async fn submit_client(
    store: Option<&dyn RecordStore>,
    submission: ClientSubmission,
) -> Result<Confirmation> {
    let store = require_store(store)?;

    let missing = submission.missing_required();
    if !missing.is_empty() {
        warn!(missing = ?missing, "submission_validation_failed");
        return Err(SubmissionError::missing_fields(&missing));
    }

    let fields = RecordFields::from_submission(submission);

    info!(
        has_company_name = !fields.company_name.is_empty(),
        has_onboarding_start_date = fields.onboarding_start_date.is_some(),
        has_initial_consultation_date = fields.initial_consultation_date.is_some(),
        needs_length = fields.needs.len(),
        "submission_forwarding"
    );

    let record = store.create_record(&fields).await?;

    info!(record_id = %record.id, "submission_recorded");

    Ok(record.into())
}

/// Fail with a configuration error when no record store is available.
pub fn require_store(store: Option<&dyn RecordStore>) -> Result<&dyn RecordStore> {
    store.ok_or_else(|| SubmissionError::configuration("Missing Airtable configuration"))
}
