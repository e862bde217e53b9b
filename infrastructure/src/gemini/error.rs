//! Error types for the Gemini adapter

use chatzia_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when communicating with the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed stream chunk: {0}")]
    MalformedChunk(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),
}

impl From<GeminiError> for GatewayError {
    fn from(e: GeminiError) -> Self {
        match e {
            GeminiError::Http(inner) => GatewayError::ConnectionError(inner.to_string()),
            other => GatewayError::RequestFailed(other.to_string()),
        }
    }
}
