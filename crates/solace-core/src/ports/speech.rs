//! Speech synthesis port.
//!
//! The synthesis collaborator is an external network service: request
//! `{text, voice_id, stability, similarity_boost}`, receive a fully buffered
//! audio payload or an error. There is no streaming and no retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Voice tuning sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

/// A single synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    /// Service-side voice identifier (not the catalog id).
    pub voice_id: String,
    pub settings: VoiceSettings,
}

/// Buffered audio returned by the synthesis service.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// Encoded audio (typically MP3).
    pub bytes: Vec<u8>,
    /// MIME type reported by the service, when known.
    pub content_type: Option<String>,
}

/// Why a synthesis attempt failed.
///
/// Configuration errors are terminal for the call; transport and decode
/// errors are handled identically by the delivery fallback.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// No synthesis credential is configured.
    #[error("No synthesis API key configured")]
    MissingCredential,

    /// Network failure before a response arrived.
    #[error("Synthesis transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Synthesis service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response could not be read or decoded.
    #[error("Synthesis response could not be decoded: {0}")]
    Decode(String),

    /// The service answered successfully but with no audio.
    #[error("Synthesis service returned no audio")]
    EmptyAudio,
}

/// Text-to-speech collaborator.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `request.text` with `request.voice_id`.
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedAudio, SynthesisError>;
}
