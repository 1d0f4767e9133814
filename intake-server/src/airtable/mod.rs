//! Airtable record store.
//!
//! The submission path only sees the `RecordStore` trait; `AirtableClient`
//! is the production implementation and tests substitute their own.

pub mod client;

use async_trait::async_trait;

use crate::error::Result;
use crate::submission::{CreatedRecord, RecordFields};

pub use client::AirtableClient;

/// Destination for mapped client records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create one record and return its acknowledgment.
    ///
    /// Implementations classify their own failures into the submission
    /// error taxonomy and perform exactly one outbound attempt.
    async fn create_record(&self, fields: &RecordFields) -> Result<CreatedRecord>;
}
