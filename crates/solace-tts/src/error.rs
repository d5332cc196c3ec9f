//! Internal error types for synthesis requests.
//!
//! Mapped to the core `SynthesisError` at the port boundary.

use solace_core::SynthesisError;
use thiserror::Error;

/// Result type alias for synthesis operations.
pub type TtsResult<T> = Result<T, TtsError>;

/// Longest error body kept from a failed response.
const MAX_ERROR_BODY: usize = 512;

/// Errors related to the synthesis API.
#[derive(Debug, Error)]
pub enum TtsError {
    /// No API key is configured.
    #[error("No synthesis API key configured")]
    MissingApiKey,

    /// API request failed with an HTTP error status.
    #[error("Synthesis request failed with status {status}: {body}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// A successful response did not carry audio.
    #[error("Expected audio, got content type {content_type}")]
    UnexpectedContentType {
        /// The content type that came back
        content_type: String,
    },

    /// A successful response had an empty body.
    #[error("Synthesis returned no audio")]
    EmptyAudio,

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TtsError {
    /// Build an `ApiRequestFailed` from a raw body, truncating long bodies.
    pub(crate) fn from_status(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let body = text.chars().take(MAX_ERROR_BODY).collect();
        Self::ApiRequestFailed { status, body }
    }
}

impl From<TtsError> for SynthesisError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::MissingApiKey => Self::MissingCredential,
            TtsError::ApiRequestFailed { status, body } => Self::Status { status, body },
            TtsError::UnexpectedContentType { content_type } => {
                Self::Decode(format!("unexpected content type {content_type}"))
            }
            TtsError::EmptyAudio => Self::EmptyAudio,
            TtsError::Network(e) => Self::Transport(e.to_string()),
            TtsError::Encode(e) => Self::Decode(e.to_string()),
        }
    }
}
