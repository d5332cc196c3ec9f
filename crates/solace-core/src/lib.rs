#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod reconcile;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    AMBIENT_SOUNDS, AmbientSound, CustomPhrase, RANDOM_VOICE_ID, VOICE_CHARACTERS, VoiceCharacter,
    builtin_phrases, concrete_voices, default_sound, resolve_sound, sound_by_id, voice_by_id,
};
pub use paths::{PathError, data_root, database_path, env_file_path};
pub use ports::{
    CoreError, PhraseRepository, Repos, RepositoryError, SettingsRepository, SpeechSynthesizer,
    SynthesisError, SynthesisRequest, SynthesizedAudio, VoiceSettings,
};
pub use reconcile::{SessionAction, SessionState, reconcile};
pub use services::{AppCore, PhraseLibrary, PhraseSource, Selection, SettingsService, select_phrase};
pub use settings::{
    PlaybackSettings, SettingsError, SettingsUpdate, VoiceMode, validate_settings,
};

#[cfg(test)]
use tokio_test as _;
