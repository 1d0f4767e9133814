//! Client submission data model and its Airtable field mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SubmissionError;

/// Inbound client onboarding form.
///
/// Every field is optional at the parse layer so that missing required
/// fields surface as validation errors instead of body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSubmission {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub onboarding_start_date: Option<String>,
    #[serde(default)]
    pub initial_consultation_date: Option<String>,
    #[serde(default)]
    pub needs: Option<String>,
}

impl ClientSubmission {
    /// Build a submission from a parsed request body.
    ///
    /// Only JSON objects are accepted; the derived deserializer would
    /// otherwise fill fields positionally from an array.
    pub fn from_json(body: Value) -> Result<Self, SubmissionError> {
        match body {
            Value::Object(map) => serde_json::from_value(Value::Object(map)).map_err(|e| {
                SubmissionError::malformed_body(format!("Invalid submission body: {e}"))
            }),
            other => Err(SubmissionError::malformed_body(format!(
                "Request body must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Names of required fields that are missing or empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.client_name) {
            missing.push("clientName");
        }
        if is_blank(&self.email) {
            missing.push("email");
        }
        missing
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Airtable record fields, keyed by the table's display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFields {
    #[serde(rename = "Client Name")]
    pub client_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Onboarding Start Date", skip_serializing_if = "Option::is_none")]
    pub onboarding_start_date: Option<String>,
    #[serde(rename = "Initial Consultation Date", skip_serializing_if = "Option::is_none")]
    pub initial_consultation_date: Option<String>,
    #[serde(rename = "Needs")]
    pub needs: String,
}

impl RecordFields {
    /// Map a submission onto Airtable labels.
    ///
    /// Free-text fields default to the empty string. Date fields are only
    /// carried when they hold a value.
    pub fn from_submission(submission: ClientSubmission) -> Self {
        RecordFields {
            client_name: submission.client_name.unwrap_or_default(),
            email: submission.email.unwrap_or_default(),
            company_name: submission.company_name.unwrap_or_default(),
            onboarding_start_date: submission.onboarding_start_date.filter(|d| !d.is_empty()),
            initial_consultation_date: submission
                .initial_consultation_date
                .filter(|d| !d.is_empty()),
            needs: submission.needs.unwrap_or_default(),
        }
    }
}

/// Outbound record-creation body.
#[derive(Debug, Serialize)]
pub struct CreateRecordRequest<'a> {
    pub fields: &'a RecordFields,
}

/// Record acknowledged by the store.
#[derive(Debug, Clone)]
pub struct CreatedRecord {
    /// Identifier assigned by the store
    pub id: String,
    /// Raw acknowledgment payload
    pub raw: Value,
}

/// Successful submission outcome.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub record_id: String,
    pub data: Value,
}

impl From<CreatedRecord> for Confirmation {
    fn from(record: CreatedRecord) -> Self {
        Confirmation {
            record_id: record.id,
            data: record.raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case() {
        let submission: ClientSubmission = serde_json::from_value(json!({
            "clientName": "Ada",
            "email": "ada@example.com",
            "onboardingStartDate": "2024-03-01",
            "needs": "Bookkeeping"
        }))
        .unwrap();

        assert_eq!(submission.client_name.as_deref(), Some("Ada"));
        assert_eq!(submission.onboarding_start_date.as_deref(), Some("2024-03-01"));
        assert!(submission.company_name.is_none());
        assert!(submission.missing_required().is_empty());
    }

    #[test]
    fn test_from_json_rejects_array() {
        match ClientSubmission::from_json(json!(["Ada", "ada@example.com"])) {
            Err(SubmissionError::Validation { details }) => {
                assert_eq!(details, "Request body must be a JSON object, got an array");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_rejects_non_string_field() {
        let result = ClientSubmission::from_json(json!({ "clientName": 42, "email": "a@b.c" }));
        assert!(matches!(result, Err(SubmissionError::Validation { .. })));
    }

    #[test]
    fn test_from_json_accepts_object() {
        let submission =
            ClientSubmission::from_json(json!({ "clientName": "Ada", "email": "a@b.c" })).unwrap();
        assert_eq!(submission.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_missing_required_reports_both() {
        let submission = ClientSubmission {
            client_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(submission.missing_required(), vec!["clientName", "email"]);
    }

    #[test]
    fn test_fields_omit_absent_dates() {
        let fields = RecordFields::from_submission(ClientSubmission {
            client_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            initial_consultation_date: Some(String::new()),
            ..Default::default()
        });

        let value = serde_json::to_value(CreateRecordRequest { fields: &fields }).unwrap();
        assert_eq!(
            value,
            json!({
                "fields": {
                    "Client Name": "Ada",
                    "Email": "ada@example.com",
                    "Company Name": "",
                    "Needs": ""
                }
            })
        );
    }

    #[test]
    fn test_fields_include_present_dates() {
        let fields = RecordFields::from_submission(ClientSubmission {
            client_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            company_name: Some("Analytical Engines Ltd".to_string()),
            onboarding_start_date: Some("2024-03-01".to_string()),
            initial_consultation_date: Some("next tuesday".to_string()),
            needs: Some("Payroll".to_string()),
        });

        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["Onboarding Start Date"], "2024-03-01");
        assert_eq!(value["Initial Consultation Date"], "next tuesday");
        assert_eq!(value["Company Name"], "Analytical Engines Ltd");
    }
}
