//! In-memory repository.

use super::{ItemFields, ItemRepository, ReviewRepository, UserRepository};
use crate::error::{Result, ReviewError};
use crate::types::{Item, ItemKey, Schedule, User};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Repository backed by ordered maps.
///
/// Items are keyed by `(user_id, language, id)` so range scans for one user
/// and language come out ordered by id.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    items: BTreeMap<(i64, String, i64), Item>,
    users: HashMap<i64, User>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(key: &ItemKey) -> (i64, String, i64) {
        (key.user_id, key.language.clone(), key.id)
    }

    fn scope(&self, user_id: i64, language: &str) -> impl Iterator<Item = &Item> {
        let start = (user_id, language.to_string(), i64::MIN);
        let end = (user_id, language.to_string(), i64::MAX);
        self.items.range(start..=end).map(|(_, item)| item)
    }
}

impl ItemRepository for MemoryRepository {
    fn find_by_id(&self, key: &ItemKey) -> Result<Option<Item>> {
        Ok(self.items.get(&Self::slot(key)).cloned())
    }

    fn find_due(&self, user_id: i64, language: &str, now: DateTime<Utc>) -> Result<Vec<Item>> {
        Ok(self
            .scope(user_id, language)
            .filter(|item| item.is_due(now))
            .cloned()
            .collect())
    }

    fn find_pool(
        &self,
        user_id: i64,
        language: &str,
        exclude_original: &str,
        limit: usize,
    ) -> Result<Vec<Item>> {
        let mut seen_targets = HashSet::new();
        Ok(self
            .scope(user_id, language)
            .filter(|item| item.original != exclude_original)
            .filter(|item| seen_targets.insert(item.target.clone()))
            .take(limit)
            .cloned()
            .collect())
    }

    fn find_by_item_id(&self, user_id: i64, id: i64) -> Result<Vec<Item>> {
        Ok(self
            .items
            .values()
            .filter(|item| item.user_id == user_id && item.id == id)
            .cloned()
            .collect())
    }

    fn upsert(&mut self, key: &ItemKey, fields: ItemFields) -> Result<()> {
        match fields {
            ItemFields::Text {
                original,
                target,
                example,
            } => {
                let item = self.items.entry(Self::slot(key)).or_insert_with(|| Item {
                    id: key.id,
                    user_id: key.user_id,
                    language: key.language.clone(),
                    original: String::new(),
                    target: String::new(),
                    example: None,
                    schedule: Schedule::Unscheduled,
                });
                item.original = original;
                item.target = target;
                item.example = example;
            }
            ItemFields::Schedule(schedule) => {
                let item = self.items.get_mut(&Self::slot(key)).ok_or_else(|| {
                    ReviewError::ItemNotFound {
                        id: key.id,
                        user_id: key.user_id,
                        language: key.language.clone(),
                    }
                })?;
                item.schedule = schedule;
            }
        }
        Ok(())
    }
}

impl UserRepository for MemoryRepository {
    fn find_user(&self, user_id: i64) -> Result<Option<User>> {
        Ok(self.users.get(&user_id).cloned())
    }

    fn set_language(&mut self, user_id: i64, language: &str) -> Result<()> {
        self.users
            .entry(user_id)
            .or_insert_with(|| User::new(user_id))
            .language = Some(language.to_string());
        Ok(())
    }

    fn append_progress(&mut self, user_id: i64, correct: bool) -> Result<()> {
        self.users
            .entry(user_id)
            .or_insert_with(|| User::new(user_id))
            .progress
            .push(correct);
        Ok(())
    }
}

impl ReviewRepository for MemoryRepository {}
