//! Error types for fetching upstream data.

use homelab_types::SchemaError;
use thiserror::Error;

/// Headline shown on a card whose query failed, whatever the cause.
pub const GENERIC_ERROR: &str = "An unexpected error occurred";

/// Errors that can occur while fetching and validating one response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Server answered with a non-success status.
    #[error("Server returned status {0}")]
    Status(u16),

    /// Body was not valid JSON for the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Body decoded but broke a format rule.
    #[error("Response failed validation: {0}")]
    Schema(#[from] SchemaError),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Base URL or client settings could not be used.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl FetchError {
    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Shape and format errors repeat on every attempt, as do 4xx answers.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(_) | FetchError::Connection(_) | FetchError::Timeout => true,
            FetchError::Status(code) => *code >= 500,
            FetchError::Parse(_) | FetchError::Schema(_) | FetchError::Config(_) => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}
