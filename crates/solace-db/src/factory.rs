//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! Construction only; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use solace_core::Repos;
use solace_core::services::AppCore;

use crate::repositories::{SqlitePhraseRepository, SqliteSettingsRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct RepoFactory;

impl RepoFactory {
    /// Build all `SQLite` repositories from a pool.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteSettingsRepository::new(pool.clone())),
            Arc::new(SqlitePhraseRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` from a pool.
    ///
    /// ```ignore
    /// let pool = setup_database(&db_path).await?;
    /// let core = RepoFactory::build_app_core(pool);
    /// ```
    pub fn build_app_core(pool: SqlitePool) -> AppCore {
        AppCore::new(Self::build_repos(pool))
    }

    /// Create a settings repository from a pool.
    pub fn settings_repository(pool: SqlitePool) -> Arc<SqliteSettingsRepository> {
        Arc::new(SqliteSettingsRepository::new(pool))
    }

    /// Create a phrase repository from a pool.
    pub fn phrase_repository(pool: SqlitePool) -> Arc<SqlitePhraseRepository> {
        Arc::new(SqlitePhraseRepository::new(pool))
    }
}
