//! Wire types for the synthesis API.

use serde::Serialize;
use solace_core::VoiceSettings;

/// JSON body of a text-to-speech request.
#[derive(Debug, Serialize)]
pub struct SpeechRequestBody<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: WireVoiceSettings,
}

/// Voice settings as the API spells them.
#[derive(Debug, Serialize)]
pub struct WireVoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl From<&VoiceSettings> for WireVoiceSettings {
    fn from(settings: &VoiceSettings) -> Self {
        Self {
            stability: settings.stability,
            similarity_boost: settings.similarity_boost,
        }
    }
}
