//! Playback settings domain types and validation.
//!
//! [`PlaybackSettings`] is the single snapshot the engine reads for every
//! decision. It is owned by the external settings store; the engine only
//! ever receives cloned values of it.

use serde::{Deserialize, Serialize};

use crate::domain::voice::{RANDOM_VOICE_ID, voice_by_id};

/// Default background sound id.
pub const DEFAULT_SOUND_ID: &str = "nature_birds";

/// Default voice id.
pub const DEFAULT_VOICE_ID: &str = "sarah";

/// Frequency presets offered by the settings UI, in minutes.
pub const FREQUENCY_PRESETS: [u32; 5] = [1, 3, 5, 10, 15];

/// Longest accepted encouragement interval (one day).
pub const MAX_FREQUENCY_MINUTES: u32 = 24 * 60;

/// Longest accepted user name, in characters.
pub const MAX_USER_NAME_CHARS: usize = 64;

/// Tone of the built-in phrase tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceMode {
    #[default]
    Gentle,
    Motivating,
    Calm,
}

impl VoiceMode {
    /// All modes, in display order.
    pub const ALL: [Self; 3] = [Self::Gentle, Self::Motivating, Self::Calm];

    /// Stable lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gentle => "gentle",
            Self::Motivating => "motivating",
            Self::Calm => "calm",
        }
    }

    /// Short description shown next to the mode name.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Gentle => "Supportive & kind",
            Self::Motivating => "Energizing & upbeat",
            Self::Calm => "Peaceful & soothing",
        }
    }

    /// Parse a mode from its identifier (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl std::fmt::Display for VoiceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Playback settings snapshot.
///
/// Missing keys in stored JSON fall back to [`PlaybackSettings::default`], so
/// older payloads keep loading after new fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackSettings {
    /// Which background track loops.
    pub selected_sound: String,

    /// Background loop volume, 0.0–1.0.
    pub background_volume: f32,

    /// Spoken phrase volume, 0.0–1.0.
    pub voice_volume: f32,

    /// A concrete voice id or `"random"`.
    pub selected_voice: String,

    /// Tone of the built-in phrases.
    pub voice_mode: VoiceMode,

    /// Minutes between encouragements.
    #[serde(rename = "encouragementFrequency")]
    pub encouragement_frequency_minutes: u32,

    /// The single authoritative "should audio be active" flag.
    pub is_playing: bool,

    /// Prefer the user's own phrases over the built-in tables.
    pub use_custom_phrases: bool,

    /// Used to personalize phrases; blank disables personalization.
    pub user_name: String,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            selected_sound: DEFAULT_SOUND_ID.to_string(),
            background_volume: 0.5,
            voice_volume: 0.7,
            selected_voice: DEFAULT_VOICE_ID.to_string(),
            voice_mode: VoiceMode::Gentle,
            encouragement_frequency_minutes: 5,
            is_playing: false,
            use_custom_phrases: false,
            user_name: String::new(),
        }
    }
}

impl PlaybackSettings {
    /// Interval between encouragement ticks.
    #[must_use]
    pub fn encouragement_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.encouragement_frequency_minutes.max(1)) * 60)
    }

    /// The trimmed user name, or `None` when personalization is off.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let name = self.user_name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Apply a partial update, only touching fields that are `Some`.
    pub fn merge(&mut self, update: &SettingsUpdate) {
        if let Some(ref sound) = update.selected_sound {
            self.selected_sound.clone_from(sound);
        }
        if let Some(volume) = update.background_volume {
            self.background_volume = volume;
        }
        if let Some(volume) = update.voice_volume {
            self.voice_volume = volume;
        }
        if let Some(ref voice) = update.selected_voice {
            self.selected_voice.clone_from(voice);
        }
        if let Some(mode) = update.voice_mode {
            self.voice_mode = mode;
        }
        if let Some(minutes) = update.encouragement_frequency_minutes {
            self.encouragement_frequency_minutes = minutes;
        }
        if let Some(playing) = update.is_playing {
            self.is_playing = playing;
        }
        if let Some(custom) = update.use_custom_phrases {
            self.use_custom_phrases = custom;
        }
        if let Some(ref name) = update.user_name {
            self.user_name.clone_from(name);
        }
    }
}

/// Partial settings update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub selected_sound: Option<String>,
    pub background_volume: Option<f32>,
    pub voice_volume: Option<f32>,
    pub selected_voice: Option<String>,
    pub voice_mode: Option<VoiceMode>,
    #[serde(rename = "encouragementFrequency")]
    pub encouragement_frequency_minutes: Option<u32>,
    pub is_playing: Option<bool>,
    pub use_custom_phrases: Option<bool>,
    pub user_name: Option<String>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    VolumeOutOfRange { field: &'static str, value: f32 },

    #[error("Encouragement frequency must be between 1 and 1440 minutes, got {0}")]
    InvalidFrequency(u32),

    #[error("Unknown voice '{0}'")]
    UnknownVoice(String),

    #[error("User name is limited to 64 characters")]
    UserNameTooLong,

    #[error("Sound id cannot be empty")]
    EmptySoundId,
}

/// Validate settings values.
///
/// Unknown sound ids are accepted: the catalog resolves them to the default
/// sound at playback time.
pub fn validate_settings(settings: &PlaybackSettings) -> Result<(), SettingsError> {
    check_volume("backgroundVolume", settings.background_volume)?;
    check_volume("voiceVolume", settings.voice_volume)?;

    if !(1..=MAX_FREQUENCY_MINUTES).contains(&settings.encouragement_frequency_minutes) {
        return Err(SettingsError::InvalidFrequency(
            settings.encouragement_frequency_minutes,
        ));
    }

    if settings.selected_voice != RANDOM_VOICE_ID && voice_by_id(&settings.selected_voice).is_none()
    {
        return Err(SettingsError::UnknownVoice(settings.selected_voice.clone()));
    }

    if settings.user_name.chars().count() > MAX_USER_NAME_CHARS {
        return Err(SettingsError::UserNameTooLong);
    }

    if settings.selected_sound.trim().is_empty() {
        return Err(SettingsError::EmptySoundId);
    }

    Ok(())
}

fn check_volume(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::VolumeOutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PlaybackSettings::default();
        assert_eq!(settings.selected_sound, "nature_birds");
        assert_eq!(settings.selected_voice, "sarah");
        assert_eq!(settings.encouragement_frequency_minutes, 5);
        assert!(!settings.is_playing);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_interval_is_minutes() {
        let settings = PlaybackSettings {
            encouragement_frequency_minutes: 3,
            ..Default::default()
        };
        assert_eq!(settings.encouragement_interval().as_secs(), 180);
    }

    #[test]
    fn test_display_name_blank_is_none() {
        let mut settings = PlaybackSettings::default();
        assert_eq!(settings.display_name(), None);
        settings.user_name = "   ".to_string();
        assert_eq!(settings.display_name(), None);
        settings.user_name = "  Ada ".to_string();
        assert_eq!(settings.display_name(), Some("Ada"));
    }

    #[test]
    fn test_merge_only_touches_some_fields() {
        let mut settings = PlaybackSettings::default();
        settings.merge(&SettingsUpdate {
            voice_mode: Some(VoiceMode::Calm),
            is_playing: Some(true),
            ..Default::default()
        });
        assert_eq!(settings.voice_mode, VoiceMode::Calm);
        assert!(settings.is_playing);
        assert_eq!(settings.background_volume, 0.5);
    }

    #[test]
    fn test_validate_volume_out_of_range() {
        let settings = PlaybackSettings {
            voice_volume: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::VolumeOutOfRange { field: "voiceVolume", .. })
        ));

        let settings = PlaybackSettings {
            background_volume: f32::NAN,
            ..Default::default()
        };
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_validate_zero_frequency() {
        let settings = PlaybackSettings {
            encouragement_frequency_minutes: 0,
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidFrequency(0))
        ));
    }

    #[test]
    fn test_validate_voice() {
        let mut settings = PlaybackSettings {
            selected_voice: "random".to_string(),
            ..Default::default()
        };
        assert!(validate_settings(&settings).is_ok());

        settings.selected_voice = "nobody".to_string();
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::UnknownVoice(_))
        ));
    }

    #[test]
    fn test_voice_mode_parse() {
        assert_eq!(VoiceMode::parse("Motivating"), Some(VoiceMode::Motivating));
        assert_eq!(VoiceMode::parse("loud"), None);
    }

    #[test]
    fn test_wire_format_is_camel_case_with_defaults() {
        let json = r#"{"selectedSound":"cafe","encouragementFrequency":10,"voiceMode":"calm"}"#;
        let settings: PlaybackSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.selected_sound, "cafe");
        assert_eq!(settings.encouragement_frequency_minutes, 10);
        assert_eq!(settings.voice_mode, VoiceMode::Calm);
        assert_eq!(settings.voice_volume, 0.7);

        let out = serde_json::to_string(&settings).unwrap();
        assert!(out.contains("\"useCustomPhrases\":false"));
    }
}
