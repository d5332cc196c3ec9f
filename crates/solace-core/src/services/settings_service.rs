//! Settings service - orchestrates settings operations.

use crate::ports::{CoreError, SettingsRepository};
use crate::settings::{PlaybackSettings, SettingsUpdate, validate_settings};
use std::sync::Arc;

/// Service for settings operations.
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    /// Create a new settings service.
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Get current settings.
    pub async fn get(&self) -> Result<PlaybackSettings, CoreError> {
        self.repo.load().await.map_err(CoreError::from)
    }

    /// Get current settings, falling back to defaults when the store is unreadable.
    pub async fn load_or_default(&self) -> PlaybackSettings {
        match self.repo.load().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load settings, using defaults");
                PlaybackSettings::default()
            }
        }
    }

    /// Update settings with partial changes.
    ///
    /// Returns the previous and the new snapshot so callers can reconcile.
    pub async fn update(
        &self,
        update: SettingsUpdate,
    ) -> Result<(PlaybackSettings, PlaybackSettings), CoreError> {
        let previous = self.repo.load().await.map_err(CoreError::from)?;
        let mut current = previous.clone();
        current.merge(&update);
        validate_settings(&current)?;
        self.repo.save(&current).await.map_err(CoreError::from)?;
        Ok((previous, current))
    }

    /// Save complete settings (validates first).
    pub async fn save(&self, settings: &PlaybackSettings) -> Result<(), CoreError> {
        validate_settings(settings)?;
        self.repo.save(settings).await.map_err(CoreError::from)
    }

    /// Restore defaults.
    pub async fn reset(&self) -> Result<PlaybackSettings, CoreError> {
        let defaults = PlaybackSettings::default();
        self.repo.save(&defaults).await.map_err(CoreError::from)?;
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RepositoryError;
    use crate::settings::VoiceMode;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSettingsRepo {
        settings: Mutex<PlaybackSettings>,
        broken: bool,
    }

    impl MockSettingsRepo {
        fn new() -> Self {
            Self {
                settings: Mutex::new(PlaybackSettings::default()),
                broken: false,
            }
        }
    }

    #[async_trait]
    impl SettingsRepository for MockSettingsRepo {
        async fn load(&self) -> Result<PlaybackSettings, RepositoryError> {
            if self.broken {
                return Err(RepositoryError::Serialization("bad json".to_string()));
            }
            Ok(self.settings.lock().unwrap().clone())
        }

        async fn save(&self, settings: &PlaybackSettings) -> Result<(), RepositoryError> {
            *self.settings.lock().unwrap() = settings.clone();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_get_default_settings() {
        let repo = Arc::new(MockSettingsRepo::new());
        let service = SettingsService::new(repo);

        let settings = service.get().await.unwrap();
        assert_eq!(settings.selected_sound, "nature_birds");
    }

    #[tokio::test]
    async fn test_update_settings() {
        let repo = Arc::new(MockSettingsRepo::new());
        let service = SettingsService::new(repo);

        let update = SettingsUpdate {
            voice_mode: Some(VoiceMode::Motivating),
            is_playing: Some(true),
            ..Default::default()
        };

        let (previous, updated) = service.update(update).await.unwrap();
        assert!(!previous.is_playing);
        assert!(updated.is_playing);
        assert_eq!(updated.voice_mode, VoiceMode::Motivating);

        // Verify persisted
        let fetched = service.get().await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_invalid_update_is_not_persisted() {
        let repo = Arc::new(MockSettingsRepo::new());
        let service = SettingsService::new(repo);

        let update = SettingsUpdate {
            encouragement_frequency_minutes: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            service.update(update).await,
            Err(CoreError::Settings(_))
        ));
        assert_eq!(service.get().await.unwrap().encouragement_frequency_minutes, 5);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let repo = Arc::new(MockSettingsRepo::new());
        let service = SettingsService::new(repo);
        service
            .update(SettingsUpdate {
                user_name: Some("Ada".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let reset = service.reset().await.unwrap();
        assert_eq!(reset, PlaybackSettings::default());
        assert_eq!(service.get().await.unwrap().user_name, "");
    }

    #[tokio::test]
    async fn test_load_or_default_on_broken_store() {
        let repo = Arc::new(MockSettingsRepo {
            broken: true,
            ..MockSettingsRepo::new()
        });
        let service = SettingsService::new(repo);
        assert_eq!(service.load_or_default().await, PlaybackSettings::default());
    }
}
