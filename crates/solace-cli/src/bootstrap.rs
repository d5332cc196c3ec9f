//! CLI bootstrap: the composition root.
//!
//! The only place where infrastructure is wired together:
//! - Database pool and repositories (via solace-db)
//! - Speech synthesizer (via solace-tts)
//! - Core services (via solace-core)
//!
//! The audio device is opened by the commands that play sound, so catalog
//! and settings commands work on machines without one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use solace_audio::{AmbientSession, RodioOutput, SessionEvent};
use solace_core::paths::{data_root, database_path_in, ensure_directory};
use solace_core::services::AppCore;
use solace_core::{Repos, SpeechSynthesizer};
use solace_db::{RepoFactory, setup_database};
use solace_tts::{ElevenLabsSynthesizer, TtsClientConfig};
use tokio::sync::mpsc::UnboundedSender;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding the database.
    pub data_dir: PathBuf,
    /// Synthesis client settings.
    pub tts: TtsClientConfig,
}

impl CliConfig {
    /// Resolve the data directory (explicit override first) and read the
    /// synthesis settings from the environment.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self, CliError> {
        let data_dir = match data_dir {
            Some(dir) => {
                ensure_directory(&dir)?;
                dir
            }
            None => data_root()?,
        };
        Ok(Self {
            data_dir,
            tts: TtsClientConfig::from_env(),
        })
    }

    pub fn database_path(&self) -> PathBuf {
        database_path_in(&self.data_dir)
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Raw repositories, handed to audio sessions.
    pub repos: Repos,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub config: CliConfig,
}

impl CliContext {
    /// Access the `AppCore`.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }

    /// Open the default audio device and build a session on it.
    pub fn open_session(&self, events: UnboundedSender<SessionEvent>) -> Result<AmbientSession> {
        let output = RodioOutput::new().map_err(CliError::from)?;
        Ok(AmbientSession::builder(
            Arc::new(output),
            Arc::clone(&self.synthesizer),
            Arc::clone(&self.repos.phrases),
        )
        .events(events)
        .build())
    }
}

/// Bootstrap the CLI application.
///
/// 1. Opens (or creates) the database and builds the repositories
/// 2. Assembles the `AppCore`
/// 3. Creates the synthesis client
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let db_path = config.database_path();
    let pool = setup_database(&db_path)
        .await
        .map_err(|e| CliError::Database(format!("{}: {e}", db_path.display())))?;

    let repos = RepoFactory::build_repos(pool);
    let app = AppCore::new(repos.clone());

    if !config.tts.has_api_key() {
        tracing::warn!("No ELEVENLABS_API_KEY set; encouragements will be shown as text only");
    }
    let synthesizer = ElevenLabsSynthesizer::new(config.tts.clone())
        .context("Failed to create speech synthesis client")?;

    Ok(CliContext {
        app,
        repos,
        synthesizer: Arc::new(synthesizer),
        config,
    })
}
