//! Intake - client onboarding submissions forwarded to Airtable.
//!
//! This library backs the `intake-server` binary. One endpoint accepts an
//! onboarding form, checks the required fields, maps it to the Airtable
//! table's column labels and creates one record.
//!
//! ## Architecture
//!
//! ```text
//! POST /api/submit-client → web::submit_client → submission::submit_client → RecordStore (Airtable)
//! ```

pub mod airtable;
pub mod config;
pub mod error;
pub mod submission;
pub mod web;

// Re-export commonly used types
pub use airtable::{AirtableClient, RecordStore};
pub use config::{AirtableSettings, Config};
pub use error::SubmissionError;
pub use submission::{submit_client, ClientSubmission, Confirmation, RecordFields};
pub use web::{router, AppState};
