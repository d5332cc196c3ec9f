//! Custom phrase repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::CustomPhrase;

/// Repository for the user's custom phrase collection.
///
/// Ordering is insertion order. Selection logic never lives here; see
/// [`crate::services::phrase_selector`].
#[async_trait]
pub trait PhraseRepository: Send + Sync {
    /// List all phrases in insertion order.
    async fn list(&self) -> Result<Vec<CustomPhrase>, RepositoryError>;

    /// Append a phrase.
    async fn insert(&self, phrase: &CustomPhrase) -> Result<(), RepositoryError>;

    /// Append several phrases atomically.
    async fn insert_many(&self, phrases: &[CustomPhrase]) -> Result<(), RepositoryError>;

    /// Replace the text of an existing phrase.
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids.
    async fn update_text(&self, id: &str, text: &str) -> Result<(), RepositoryError>;

    /// Delete a phrase. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}
