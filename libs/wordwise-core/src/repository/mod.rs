//! Storage interfaces the review core depends on.
//!
//! Implementations must give read-your-writes per identity triple. Writes for
//! one user are issued serially by that user's session.

pub mod memory;

use crate::error::{Result, ReviewError};
use crate::types::{Item, ItemKey, Schedule, User};
use crate::vocabulary::VocabularyEntry;
use chrono::{DateTime, Utc};

pub use memory::MemoryRepository;

/// Fields written by [`ItemRepository::upsert`].
#[derive(Debug, Clone, PartialEq)]
pub enum ItemFields {
    /// Display fields. Creates the item as unscheduled if missing and never
    /// touches an existing schedule.
    Text {
        original: String,
        target: String,
        example: Option<String>,
    },
    /// Scheduling state. The item must already exist.
    Schedule(Schedule),
}

impl From<&VocabularyEntry> for ItemFields {
    fn from(entry: &VocabularyEntry) -> Self {
        Self::Text {
            original: entry.original.clone(),
            target: entry.target.clone(),
            example: entry.example.clone(),
        }
    }
}

/// Repository for item operations.
pub trait ItemRepository {
    fn find_by_id(&self, key: &ItemKey) -> Result<Option<Item>>;

    /// Due items for a user and language, ordered by id.
    fn find_due(&self, user_id: i64, language: &str, now: DateTime<Utc>) -> Result<Vec<Item>>;

    /// Smallest-id due item.
    fn first_due(&self, user_id: i64, language: &str, now: DateTime<Utc>) -> Result<Option<Item>> {
        Ok(self.find_due(user_id, language, now)?.into_iter().next())
    }

    /// Items whose `original` differs from `exclude_original`, distinct by
    /// `target`, ordered by id and capped at `limit`.
    fn find_pool(
        &self,
        user_id: i64,
        language: &str,
        exclude_original: &str,
        limit: usize,
    ) -> Result<Vec<Item>>;

    /// Every copy of vocabulary entry `id` the user holds, one per language.
    fn find_by_item_id(&self, user_id: i64, id: i64) -> Result<Vec<Item>>;

    fn upsert(&mut self, key: &ItemKey, fields: ItemFields) -> Result<()>;

    /// Merge a vocabulary list into the user's items for `language`.
    fn seed(&mut self, user_id: i64, language: &str, entries: &[VocabularyEntry]) -> Result<()> {
        for entry in entries {
            self.upsert(&ItemKey::new(entry.id, user_id, language), entry.into())?;
        }
        Ok(())
    }
}

/// Repository for user operations.
pub trait UserRepository {
    fn find_user(&self, user_id: i64) -> Result<Option<User>>;

    /// Create the user if missing and select `language`.
    fn set_language(&mut self, user_id: i64, language: &str) -> Result<()>;

    /// Create the user if missing and append one outcome to its progress.
    fn append_progress(&mut self, user_id: i64, correct: bool) -> Result<()>;
}

/// Writes that must land together when an answer is scored.
pub trait ReviewRepository: ItemRepository + UserRepository {
    /// Store the item's new schedule and append the outcome to the user's
    /// progress. Either both writes are kept or neither is.
    ///
    /// The default restores the previous schedule when the progress write
    /// fails. Stores with transactions should override it.
    fn record_review(&mut self, key: &ItemKey, schedule: Schedule, correct: bool) -> Result<()> {
        let previous = self
            .find_by_id(key)?
            .ok_or_else(|| ReviewError::ItemNotFound {
                id: key.id,
                user_id: key.user_id,
                language: key.language.clone(),
            })?
            .schedule;

        self.upsert(key, ItemFields::Schedule(schedule))?;

        if let Err(e) = self.append_progress(key.user_id, correct) {
            if let Err(restore) = self.upsert(key, ItemFields::Schedule(previous)) {
                tracing::error!(
                    item_id = key.id,
                    user_id = key.user_id,
                    error = %restore,
                    "failed to restore schedule after progress write failed"
                );
            }
            return Err(e);
        }
        Ok(())
    }
}
