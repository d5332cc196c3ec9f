//! Repository implementations using `SQLite`.
//!
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_phrase_repository;
mod sqlite_settings_repository;

pub use sqlite_phrase_repository::SqlitePhraseRepository;
pub use sqlite_settings_repository::SqliteSettingsRepository;
