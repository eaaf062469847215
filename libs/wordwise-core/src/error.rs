//! Error types for wordwise-core.

use thiserror::Error;

/// Result type alias using ReviewError.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Errors raised while running a review turn.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("item {id} not found for user {user_id} in {language}")]
    ItemNotFound {
        id: i64,
        user_id: i64,
        language: String,
    },

    #[error("not enough vocabulary to build distractors for item {id} in {language}")]
    InsufficientVocabulary { id: i64, language: String },

    #[error("answer for item {id} in {language} does not match the pending prompt")]
    StaleAnswer { id: i64, language: String },

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors that can occur while decoding inbound events.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("malformed answer token: {0}")]
    MalformedToken(#[from] serde_json::Error),

    #[error("invalid answer token: {0}")]
    InvalidToken(String),
}

/// Errors that can occur while loading vocabulary lists.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("empty {field} at line {line}")]
    EmptyField { field: &'static str, line: u64 },

    #[error("duplicate ID {id} at line {line}")]
    DuplicateId { id: i64, line: u64 },
}
