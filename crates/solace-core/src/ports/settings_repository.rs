//! Settings repository trait definition.
//!
//! This port defines the interface for playback settings persistence.
//! Implementations handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::settings::PlaybackSettings;

/// Repository for playback settings persistence.
///
/// Settings are stored and retrieved as a whole snapshot.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load playback settings.
    ///
    /// Returns default settings if none are stored.
    async fn load(&self) -> Result<PlaybackSettings, RepositoryError>;

    /// Save playback settings.
    async fn save(&self, settings: &PlaybackSettings) -> Result<(), RepositoryError>;
}
