//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete implementations.

mod app_core;
mod phrase_library;
mod phrase_selector;
mod settings_service;

pub use app_core::AppCore;
pub use phrase_library::{MIN_IMPORT_CHARS, PhraseLibrary, split_import_text};
pub use phrase_selector::{PhraseSource, Selection, personalize, pick_avoiding, resolve_voice, select_phrase};
pub use settings_service::SettingsService;
