//! Database error types.

use thiserror::Error;
use wordwise_core::ReviewError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("item {id} not found for user {user_id} in {language}")]
    ItemNotFound {
        id: i64,
        user_id: i64,
        language: String,
    },
}

impl From<DbError> for ReviewError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::ItemNotFound {
                id,
                user_id,
                language,
            } => ReviewError::ItemNotFound {
                id,
                user_id,
                language,
            },
            other => ReviewError::Storage(other.to_string()),
        }
    }
}
