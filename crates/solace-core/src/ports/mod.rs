//! Traits the engine needs from storage and speech synthesis.
//!
//! Signatures use domain types only; no `sqlx` or `reqwest` types cross
//! this boundary. Synthesis is text in, audio bytes out.

pub mod phrase_repository;
pub mod settings_repository;
pub mod speech;

use std::sync::Arc;
use thiserror::Error;

pub use phrase_repository::PhraseRepository;
pub use settings_repository::SettingsRepository;
pub use speech::{
    SpeechSynthesizer, SynthesisError, SynthesisRequest, SynthesizedAudio, VoiceSettings,
};

/// The two stores a running app needs, behind their ports.
#[derive(Clone)]
pub struct Repos {
    pub settings: Arc<dyn SettingsRepository>,
    pub phrases: Arc<dyn PhraseRepository>,
}

impl Repos {
    pub fn new(settings: Arc<dyn SettingsRepository>, phrases: Arc<dyn PhraseRepository>) -> Self {
        Self { settings, phrases }
    }
}

/// Storage failure reported by a repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database or filesystem failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Error returned by core services.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Rejected user input, such as a blank phrase.
    #[error("Validation error: {0}")]
    Validation(String),
}
