//! Configuration module for environment variable parsing.
//!
//! Configuration is read once at startup and shared read-only with every
//! request. Missing Airtable credentials do not stop the process; requests
//! fail with a configuration error instead.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::SubmissionError;

/// Default Airtable REST endpoint.
pub const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Airtable personal access token
    pub airtable_api_key: Option<String>,

    /// Airtable base identifier
    pub airtable_base_id: Option<String>,

    /// Airtable table name or identifier
    pub airtable_table_name: Option<String>,

    /// Base URL of the Airtable REST API
    pub airtable_api_url: String,

    /// Outbound request timeout in milliseconds
    pub airtable_timeout_ms: u64,

    /// Port for the web server to listen on
    pub port: u16,

    /// Allowed CORS origins; `None` allows any origin
    pub cors_allowed_origins: Option<Vec<String>>,
}

/// Complete set of values needed to talk to Airtable.
#[derive(Debug, Clone)]
pub struct AirtableSettings {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            airtable_api_key: None,
            airtable_base_id: None,
            airtable_table_name: None,
            airtable_api_url: DEFAULT_AIRTABLE_API_URL.to_string(),
            airtable_timeout_ms: 10_000,
            port: 5050,
            cors_allowed_origins: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            airtable_api_key: non_empty_var("AIRTABLE_API_KEY"),

            airtable_base_id: non_empty_var("AIRTABLE_BASE_ID"),

            airtable_table_name: non_empty_var("AIRTABLE_TABLE_NAME"),

            airtable_api_url: non_empty_var("AIRTABLE_API_URL")
                .unwrap_or(defaults.airtable_api_url),

            airtable_timeout_ms: parse_nonzero("AIRTABLE_TIMEOUT_MS", defaults.airtable_timeout_ms),

            port: parse_number("PORT", defaults.port),

            cors_allowed_origins: parse_csv("CORS_ALLOWED_ORIGINS"),
        }
    }

    /// Names of the Airtable variables that are not set.
    pub fn missing_airtable_vars(&self) -> Vec<&'static str> {
        [
            ("AIRTABLE_API_KEY", &self.airtable_api_key),
            ("AIRTABLE_BASE_ID", &self.airtable_base_id),
            ("AIRTABLE_TABLE_NAME", &self.airtable_table_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Resolve the Airtable settings, failing if any piece is missing.
    pub fn airtable(&self) -> Result<AirtableSettings, SubmissionError> {
        match (
            &self.airtable_api_key,
            &self.airtable_base_id,
            &self.airtable_table_name,
        ) {
            (Some(api_key), Some(base_id), Some(table_name)) => Ok(AirtableSettings {
                api_key: api_key.clone(),
                base_id: base_id.clone(),
                table_name: table_name.clone(),
                api_url: self.airtable_api_url.clone(),
                timeout: Duration::from_millis(self.airtable_timeout_ms),
            }),
            _ => Err(SubmissionError::configuration(format!(
                "Missing Airtable configuration: {}",
                self.missing_airtable_vars().join(", ")
            ))),
        }
    }
}

/// Read a variable, treating an empty value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a numeric variable, falling back to the default when invalid.
fn parse_number<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid numeric value, using default");
            default
        }
    }
}

/// Parse a numeric variable that must be greater than zero.
fn parse_nonzero(name: &str, default: u64) -> u64 {
    match parse_number(name, default) {
        0 => {
            warn!(env_var = name, value = 0, "Zero is not allowed, using default");
            default
        }
        value => value,
    }
}

/// Parse a comma-separated list of strings.
fn parse_csv(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}
