//! Phrase library service - orchestrates custom phrase operations.
//!
//! Mutation goes through the [`PhraseRepository`] port; this service owns
//! the input rules (trimming, minimum length, case-insensitive dedup).

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::CustomPhrase;
use crate::ports::{CoreError, PhraseRepository};

/// Imported lines must be longer than this many characters.
pub const MIN_IMPORT_CHARS: usize = 3;

/// Service for custom phrase operations.
pub struct PhraseLibrary {
    repo: Arc<dyn PhraseRepository>,
}

impl PhraseLibrary {
    /// Create a new phrase library service.
    pub fn new(repo: Arc<dyn PhraseRepository>) -> Self {
        Self { repo }
    }

    /// List all custom phrases.
    pub async fn list(&self) -> Result<Vec<CustomPhrase>, CoreError> {
        self.repo.list().await.map_err(CoreError::from)
    }

    /// List all custom phrases, degrading to an empty pool on read failure.
    pub async fn list_or_empty(&self) -> Vec<CustomPhrase> {
        match self.repo.list().await {
            Ok(phrases) => phrases,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load custom phrases");
                Vec::new()
            }
        }
    }

    /// Add a single phrase. The text is trimmed and must not be empty.
    pub async fn add(&self, text: &str) -> Result<CustomPhrase, CoreError> {
        let text = non_empty(text)?;
        let phrase = CustomPhrase::new(text);
        self.repo.insert(&phrase).await?;
        tracing::info!(id = %phrase.id, "Added custom phrase");
        Ok(phrase)
    }

    /// Replace the text of an existing phrase.
    pub async fn update(&self, id: &str, text: &str) -> Result<(), CoreError> {
        let text = non_empty(text)?;
        self.repo.update_text(id, text).await?;
        Ok(())
    }

    /// Delete a phrase by id.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.repo.delete(id).await?;
        Ok(())
    }

    /// Import phrases line by line, returning how many were added.
    ///
    /// Lines are trimmed. Lines of [`MIN_IMPORT_CHARS`] characters or fewer
    /// are rejected, as are lines matching an existing phrase or an earlier
    /// line of the same batch (case-insensitive).
    pub async fn import<S: AsRef<str>>(&self, lines: &[S]) -> Result<usize, CoreError> {
        let existing = self.repo.list().await?;
        let mut seen: HashSet<String> = existing.iter().map(|p| p.text.to_lowercase()).collect();

        let mut added = Vec::new();
        for line in lines {
            let text = line.as_ref().trim();
            if text.chars().count() <= MIN_IMPORT_CHARS {
                continue;
            }
            if seen.insert(text.to_lowercase()) {
                added.push(CustomPhrase::new(text));
            }
        }

        if !added.is_empty() {
            self.repo.insert_many(&added).await?;
        }

        tracing::info!(
            offered = lines.len(),
            added = added.len(),
            "Imported custom phrases"
        );
        Ok(added.len())
    }

    /// Export all phrases as newline-separated text, ready for [`Self::import`].
    pub async fn export(&self) -> Result<String, CoreError> {
        let phrases = self.repo.list().await?;
        Ok(phrases
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Split pasted text into candidate import lines, dropping blank ones.
pub fn split_import_text(text: &str) -> Vec<&str> {
    text.lines().filter(|l| !l.trim().is_empty()).collect()
}

fn non_empty(text: &str) -> Result<&str, CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CoreError::Validation("Phrase text cannot be empty".to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RepositoryError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryPhraseRepo {
        phrases: Mutex<Vec<CustomPhrase>>,
        fail_reads: bool,
    }

    #[async_trait]
    impl PhraseRepository for MemoryPhraseRepo {
        async fn list(&self) -> Result<Vec<CustomPhrase>, RepositoryError> {
            if self.fail_reads {
                return Err(RepositoryError::Storage("disk on fire".to_string()));
            }
            Ok(self.phrases.lock().unwrap().clone())
        }

        async fn insert(&self, phrase: &CustomPhrase) -> Result<(), RepositoryError> {
            self.phrases.lock().unwrap().push(phrase.clone());
            Ok(())
        }

        async fn insert_many(&self, phrases: &[CustomPhrase]) -> Result<(), RepositoryError> {
            self.phrases.lock().unwrap().extend_from_slice(phrases);
            Ok(())
        }

        async fn update_text(&self, id: &str, text: &str) -> Result<(), RepositoryError> {
            let mut phrases = self.phrases.lock().unwrap();
            let phrase = phrases
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
            phrase.text = text.to_string();
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
            self.phrases.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }
    }

    fn new_library() -> (PhraseLibrary, Arc<MemoryPhraseRepo>) {
        let repo = Arc::new(MemoryPhraseRepo::default());
        (PhraseLibrary::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_import_rejects_short_lines() {
        let (library, _repo) = new_library();
        let added = library
            .import(&["hi", "Keep pushing forward."])
            .await
            .unwrap();
        assert_eq!(added, 1);

        let phrases = library.list().await.unwrap();
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].text, "Keep pushing forward.");
    }

    #[tokio::test]
    async fn test_import_dedups_case_insensitively() {
        let (library, _repo) = new_library();
        library.add("You can do this").await.unwrap();

        let added = library
            .import(&[
                "you CAN do this",
                "  Breathe deeply  ",
                "breathe deeply",
                "abcd",
                "abc",
            ])
            .await
            .unwrap();
        assert_eq!(added, 2);

        let texts: Vec<String> = library
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.text)
            .collect();
        assert_eq!(texts, vec!["You can do this", "Breathe deeply", "abcd"]);
    }

    #[tokio::test]
    async fn test_add_rejects_blank() {
        let (library, _repo) = new_library();
        assert!(matches!(
            library.add("   ").await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (library, _repo) = new_library();
        let phrase = library.add("First draft").await.unwrap();

        library.update(&phrase.id, "  Final draft ").await.unwrap();
        assert_eq!(library.list().await.unwrap()[0].text, "Final draft");

        assert!(matches!(
            library.update("missing", "x").await,
            Err(CoreError::Repository(RepositoryError::NotFound(_)))
        ));

        library.delete(&phrase.id).await.unwrap();
        assert!(library.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_empty() {
        let repo = Arc::new(MemoryPhraseRepo {
            fail_reads: true,
            ..Default::default()
        });
        let library = PhraseLibrary::new(repo);
        assert!(library.list_or_empty().await.is_empty());
        assert!(library.list().await.is_err());
    }

    #[tokio::test]
    async fn test_export_round_trips_through_import() {
        let (library, _repo) = new_library();
        library.add("Stay curious").await.unwrap();
        library.add("Rest is productive").await.unwrap();

        let exported = library.export().await.unwrap();
        assert_eq!(exported, "Stay curious\nRest is productive");

        let (other, _repo) = new_library();
        let added = other.import(&split_import_text(&exported)).await.unwrap();
        assert_eq!(added, 2);
    }

    #[test]
    fn test_split_import_text_drops_blank_lines() {
        let lines = split_import_text("one line\n\n   \nanother line\r\n");
        assert_eq!(lines, vec!["one line", "another line"]);
    }
}
