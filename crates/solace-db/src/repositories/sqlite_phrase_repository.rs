//! `SQLite` implementation of the `PhraseRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use solace_core::{CustomPhrase, PhraseRepository, RepositoryError};

use super::row_mappers::{PHRASE_SELECT_COLUMNS, row_to_phrase, storage_err};

/// `SQLite` implementation of the `PhraseRepository` trait.
///
/// Phrases keep their insertion order through a `position` column.
pub struct SqlitePhraseRepository {
    pool: SqlitePool,
}

impl SqlitePhraseRepository {
    /// Create a new `SQLite` phrase repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const NEXT_POSITION: &str = "SELECT COALESCE(MAX(position), -1) + 1 FROM custom_phrases";

#[async_trait]
impl PhraseRepository for SqlitePhraseRepository {
    async fn list(&self) -> Result<Vec<CustomPhrase>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {PHRASE_SELECT_COLUMNS} FROM custom_phrases ORDER BY position ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        rows.iter().map(row_to_phrase).collect()
    }

    async fn insert(&self, phrase: &CustomPhrase) -> Result<(), RepositoryError> {
        self.insert_many(std::slice::from_ref(phrase)).await
    }

    async fn insert_many(&self, phrases: &[CustomPhrase]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let (mut position,): (i64,) = sqlx::query_as(NEXT_POSITION)
            .fetch_one(&mut *tx)
            .await
            .map_err(storage_err)?;

        for phrase in phrases {
            sqlx::query(
                "INSERT INTO custom_phrases (id, text, created_at, position) VALUES (?, ?, ?, ?)",
            )
            .bind(&phrase.id)
            .bind(&phrase.text)
            .bind(phrase.created_at)
            .bind(position)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;
            position += 1;
        }

        tx.commit().await.map_err(storage_err)?;
        Ok(())
    }

    async fn update_text(&self, id: &str, text: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE custom_phrases SET text = ? WHERE id = ?")
            .bind(text)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("phrase {id}")));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM custom_phrases WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }
}
