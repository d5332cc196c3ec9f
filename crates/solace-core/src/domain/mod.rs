//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, audio devices, network).
//!
//! # Structure
//!
//! - `sound` - Static ambient sound catalog
//! - `voice` - Voice characters and the `random` sentinel
//! - `phrase` - Custom phrases and the built-in phrase tables

pub mod phrase;
pub mod sound;
pub mod voice;

// Re-export domain types for convenience
pub use phrase::{CustomPhrase, builtin_phrases, new_phrase_id};
pub use sound::{
    AMBIENT_SOUNDS, AmbientSound, default_sound, resolve_sound, sound_by_id, sound_categories,
    sounds_by_category,
};
pub use voice::{RANDOM_VOICE_ID, VOICE_CHARACTERS, VoiceCharacter, concrete_voices, voice_by_id};
