//! Row mapping helpers for `SQLite` queries.

use solace_core::{CustomPhrase, RepositoryError};
use sqlx::Row;

/// Shared SELECT column list for phrase queries.
pub const PHRASE_SELECT_COLUMNS: &str = "id, text, created_at";

/// Map any sqlx error into the storage variant.
pub fn storage_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// Parse a database row into a `CustomPhrase`.
pub fn row_to_phrase(row: &sqlx::sqlite::SqliteRow) -> Result<CustomPhrase, RepositoryError> {
    Ok(CustomPhrase {
        id: row.try_get("id").map_err(storage_err)?,
        text: row.try_get("text").map_err(storage_err)?,
        created_at: row.try_get::<i64, _>("created_at").map_err(storage_err)?,
    })
}
