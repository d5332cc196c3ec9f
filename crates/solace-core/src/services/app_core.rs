//! `AppCore` - the primary application facade.
//!
//! Adapters (CLI, audio engine) receive an `AppCore` and use it to reach the
//! settings and phrase services.

use crate::ports::Repos;

use super::{PhraseLibrary, SettingsService};

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let repos = Repos::new(settings_repo, phrase_repo);
/// let core = AppCore::new(repos);
///
/// let settings = core.settings().get().await?;
/// let added = core.phrases().import(&lines).await?;
/// ```
pub struct AppCore {
    settings: SettingsService,
    phrases: PhraseLibrary,
}

impl AppCore {
    /// Create a new `AppCore` with the given repositories.
    pub fn new(repos: Repos) -> Self {
        Self {
            settings: SettingsService::new(repos.settings),
            phrases: PhraseLibrary::new(repos.phrases),
        }
    }

    /// Access the settings service.
    pub const fn settings(&self) -> &SettingsService {
        &self.settings
    }

    /// Access the phrase library.
    pub const fn phrases(&self) -> &PhraseLibrary {
        &self.phrases
    }
}
