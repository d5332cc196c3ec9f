//! Phrase library behavior against an in-memory store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use solace_core::{
    CustomPhrase, PhraseLibrary, PhraseRepository, PhraseSource, PlaybackSettings,
    RepositoryError, select_phrase,
};

#[derive(Default)]
struct InMemoryPhrases {
    phrases: Mutex<Vec<CustomPhrase>>,
}

#[async_trait]
impl PhraseRepository for InMemoryPhrases {
    async fn list(&self) -> Result<Vec<CustomPhrase>, RepositoryError> {
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
        match phrases.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.text = text.to_string();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.phrases.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

#[tokio::test]
async fn import_into_empty_pool_skips_short_lines() {
    let library = PhraseLibrary::new(Arc::new(InMemoryPhrases::default()));

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
async fn imported_phrases_feed_the_selector() {
    let library = PhraseLibrary::new(Arc::new(InMemoryPhrases::default()));
    library
        .import(&["Keep going", "You are doing great"])
        .await
        .unwrap();

    let settings = PlaybackSettings {
        use_custom_phrases: true,
        ..Default::default()
    };
    let pool = library.list_or_empty().await;
    let mut rng = StdRng::seed_from_u64(11);

    let mut last: Option<String> = None;
    for _ in 0..50 {
        let selection = select_phrase(&settings, &pool, last.as_deref(), &mut rng);
        assert_eq!(selection.source, PhraseSource::Custom);
        assert_ne!(Some(selection.phrase.as_str()), last.as_deref());
        last = Some(selection.phrase);
    }
}

#[tokio::test]
async fn single_custom_phrase_repeats() {
    let library = PhraseLibrary::new(Arc::new(InMemoryPhrases::default()));
    library.add("Keep going").await.unwrap();

    let settings = PlaybackSettings {
        use_custom_phrases: true,
        ..Default::default()
    };
    let pool = library.list_or_empty().await;
    let mut rng = StdRng::seed_from_u64(3);

    let selection = select_phrase(&settings, &pool, Some("Keep going"), &mut rng);
    assert_eq!(selection.phrase, "Keep going");
}
