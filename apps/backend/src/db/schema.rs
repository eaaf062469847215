//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the SQLite database.
pub const SCHEMA: &str = r#"
-- Learners
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    language TEXT
);

-- Append-only review outcomes
CREATE TABLE IF NOT EXISTS progress (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    correct INTEGER NOT NULL,
    recorded_at TEXT NOT NULL
);

-- Vocabulary items per user and language. Scheduling columns are all NULL
-- until the first review.
CREATE TABLE IF NOT EXISTS items (
    id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    language TEXT NOT NULL,
    original TEXT NOT NULL,
    target TEXT NOT NULL,
    example TEXT,
    next_review INTEGER,
    interval_ms INTEGER,
    ease_factor REAL,
    PRIMARY KEY (id, user_id, language)
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_items_due ON items(user_id, language, next_review);
CREATE INDEX IF NOT EXISTS idx_progress_user ON progress(user_id, seq);
"#;
