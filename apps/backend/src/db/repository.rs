//! Repository pattern for database access.

use crate::db::error::DbError;
use crate::db::schema::{SCHEMA, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use wordwise_core::{
    Item, ItemFields, ItemKey, ItemRepository, ReviewRepository, Schedule, User, UserRepository,
    VocabularyEntry,
};

type Result<T> = std::result::Result<T, DbError>;

const ITEM_COLUMNS: &str =
    "id, user_id, language, original, target, example, next_review, interval_ms, ease_factor";

const UPSERT_ITEM_TEXT: &str = "INSERT INTO items (id, user_id, language, original, target, example)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT(id, user_id, language) DO UPDATE SET
        original = excluded.original,
        target = excluded.target,
        example = excluded.example";

/// SQLite implementation of the review repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    pub fn get_item(&self, key: &ItemKey) -> Result<Option<Item>> {
        let sql = format!(
            "SELECT {} FROM items WHERE id = ?1 AND user_id = ?2 AND language = ?3",
            ITEM_COLUMNS
        );
        self.conn
            .query_row(&sql, params![key.id, key.user_id, key.language], Self::row_to_item)
            .optional()
            .map_err(Into::into)
    }

    /// Due items ordered by id. `None` returns every due item.
    pub fn get_due_items(
        &self,
        user_id: i64,
        language: &str,
        now: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Result<Vec<Item>> {
        let sql = format!(
            "SELECT {} FROM items
             WHERE user_id = ?1 AND language = ?2 AND (next_review IS NULL OR next_review <= ?3)
             ORDER BY id
             LIMIT ?4",
            ITEM_COLUMNS
        );
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map(
                params![user_id, language, now.timestamp_millis(), limit],
                Self::row_to_item,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Items with a different `original`, one per distinct `target`.
    pub fn get_pool(
        &self,
        user_id: i64,
        language: &str,
        exclude_original: &str,
        limit: usize,
    ) -> Result<Vec<Item>> {
        // Bare columns alongside MIN(id) come from the row holding the minimum.
        let mut stmt = self.conn.prepare(
            "SELECT MIN(id) AS id, user_id, language, original, target, example,
                    next_review, interval_ms, ease_factor
             FROM items
             WHERE user_id = ?1 AND language = ?2 AND original != ?3
             GROUP BY target
             ORDER BY id
             LIMIT ?4",
        )?;
        let items = stmt
            .query_map(
                params![user_id, language, exclude_original, limit as i64],
                Self::row_to_item,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    pub fn get_items_by_id(&self, user_id: i64, id: i64) -> Result<Vec<Item>> {
        let sql = format!(
            "SELECT {} FROM items WHERE user_id = ?1 AND id = ?2 ORDER BY language",
            ITEM_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map(params![user_id, id], Self::row_to_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    pub fn upsert_text(
        &self,
        key: &ItemKey,
        original: &str,
        target: &str,
        example: Option<&str>,
    ) -> Result<()> {
        self.conn.execute(
            UPSERT_ITEM_TEXT,
            params![key.id, key.user_id, key.language, original, target, example],
        )?;
        Ok(())
    }

    /// Overwrite the scheduling columns of an existing item.
    pub fn save_schedule(&self, key: &ItemKey, schedule: &Schedule) -> Result<()> {
        write_schedule(&self.conn, key, schedule)
    }

    /// Store a scored answer: the new schedule and the progress entry commit
    /// together or not at all.
    pub fn save_review(&mut self, key: &ItemKey, schedule: &Schedule, correct: bool) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_progress(&tx, key.user_id, correct)?;
        write_schedule(&tx, key, schedule)?;
        tx.commit()?;
        Ok(())
    }

    /// Merge a vocabulary list in one transaction.
    pub fn seed_items(
        &mut self,
        user_id: i64,
        language: &str,
        entries: &[VocabularyEntry],
    ) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT_ITEM_TEXT)?;
            for entry in entries {
                stmt.execute(params![
                    entry.id,
                    user_id,
                    language,
                    entry.original,
                    entry.target,
                    entry.example
                ])?;
            }
        }
        tx.commit()?;
        Ok(entries.len())
    }

    pub fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let language = self
            .conn
            .query_row(
                "SELECT language FROM users WHERE id = ?1",
                params![user_id],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;

        let Some(language) = language else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare("SELECT correct FROM progress WHERE user_id = ?1 ORDER BY seq")?;
        let progress = stmt
            .query_map(params![user_id], |row| row.get::<_, bool>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Some(User {
            id: user_id,
            language,
            progress,
        }))
    }

    pub fn save_language(&self, user_id: i64, language: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (id, language) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET language = excluded.language",
            params![user_id, language],
        )?;
        Ok(())
    }

    pub fn insert_progress(&self, user_id: i64, correct: bool) -> Result<()> {
        write_progress(&self.conn, user_id, correct)
    }

    fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
        let next_review: Option<i64> = row.get(6)?;
        let interval_ms: Option<i64> = row.get(7)?;
        let ease_factor: Option<f64> = row.get(8)?;

        let schedule = match (next_review, interval_ms, ease_factor) {
            (None, None, None) => Schedule::Unscheduled,
            (Some(ms), Some(interval_ms), Some(ease_factor)) => {
                let next_review = DateTime::from_timestamp_millis(ms).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        6,
                        Type::Integer,
                        format!("next_review out of range: {}", ms).into(),
                    )
                })?;
                Schedule::Scheduled {
                    next_review,
                    interval_ms,
                    ease_factor,
                }
            }
            _ => {
                return Err(rusqlite::Error::FromSqlConversionFailure(
                    6,
                    Type::Null,
                    "partially scheduled item".into(),
                ))
            }
        };

        Ok(Item {
            id: row.get(0)?,
            user_id: row.get(1)?,
            language: row.get(2)?,
            original: row.get(3)?,
            target: row.get(4)?,
            example: row.get(5)?,
            schedule,
        })
    }
}

fn write_schedule(conn: &Connection, key: &ItemKey, schedule: &Schedule) -> Result<()> {
    let (next_review, interval_ms, ease_factor) = match schedule {
        Schedule::Unscheduled => (None, None, None),
        Schedule::Scheduled {
            next_review,
            interval_ms,
            ease_factor,
        } => (
            Some(next_review.timestamp_millis()),
            Some(*interval_ms),
            Some(*ease_factor),
        ),
    };

    let updated = conn.execute(
        "UPDATE items SET next_review = ?1, interval_ms = ?2, ease_factor = ?3
         WHERE id = ?4 AND user_id = ?5 AND language = ?6",
        params![
            next_review,
            interval_ms,
            ease_factor,
            key.id,
            key.user_id,
            key.language
        ],
    )?;

    if updated == 0 {
        return Err(DbError::ItemNotFound {
            id: key.id,
            user_id: key.user_id,
            language: key.language.clone(),
        });
    }
    Ok(())
}

fn write_progress(conn: &Connection, user_id: i64, correct: bool) -> Result<()> {
    conn.execute("INSERT OR IGNORE INTO users (id) VALUES (?1)", params![user_id])?;
    conn.execute(
        "INSERT INTO progress (user_id, correct, recorded_at) VALUES (?1, ?2, ?3)",
        params![user_id, correct, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

impl ItemRepository for SqliteRepository {
    fn find_by_id(&self, key: &ItemKey) -> wordwise_core::Result<Option<Item>> {
        Ok(self.get_item(key)?)
    }

    fn find_due(
        &self,
        user_id: i64,
        language: &str,
        now: DateTime<Utc>,
    ) -> wordwise_core::Result<Vec<Item>> {
        Ok(self.get_due_items(user_id, language, now, None)?)
    }

    fn first_due(
        &self,
        user_id: i64,
        language: &str,
        now: DateTime<Utc>,
    ) -> wordwise_core::Result<Option<Item>> {
        Ok(self
            .get_due_items(user_id, language, now, Some(1))?
            .into_iter()
            .next())
    }

    fn find_pool(
        &self,
        user_id: i64,
        language: &str,
        exclude_original: &str,
        limit: usize,
    ) -> wordwise_core::Result<Vec<Item>> {
        Ok(self.get_pool(user_id, language, exclude_original, limit)?)
    }

    fn find_by_item_id(&self, user_id: i64, id: i64) -> wordwise_core::Result<Vec<Item>> {
        Ok(self.get_items_by_id(user_id, id)?)
    }

    fn upsert(&mut self, key: &ItemKey, fields: ItemFields) -> wordwise_core::Result<()> {
        match fields {
            ItemFields::Text {
                original,
                target,
                example,
            } => self.upsert_text(key, &original, &target, example.as_deref())?,
            ItemFields::Schedule(schedule) => self.save_schedule(key, &schedule)?,
        }
        Ok(())
    }

    fn seed(
        &mut self,
        user_id: i64,
        language: &str,
        entries: &[VocabularyEntry],
    ) -> wordwise_core::Result<()> {
        self.seed_items(user_id, language, entries)?;
        Ok(())
    }
}

impl UserRepository for SqliteRepository {
    fn find_user(&self, user_id: i64) -> wordwise_core::Result<Option<User>> {
        Ok(self.get_user(user_id)?)
    }

    fn set_language(&mut self, user_id: i64, language: &str) -> wordwise_core::Result<()> {
        Ok(self.save_language(user_id, language)?)
    }

    fn append_progress(&mut self, user_id: i64, correct: bool) -> wordwise_core::Result<()> {
        Ok(self.insert_progress(user_id, correct)?)
    }
}

impl ReviewRepository for SqliteRepository {
    fn record_review(
        &mut self,
        key: &ItemKey,
        schedule: Schedule,
        correct: bool,
    ) -> wordwise_core::Result<()> {
        Ok(self.save_review(key, &schedule, correct)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn entry(id: i64, original: &str, target: &str) -> VocabularyEntry {
        VocabularyEntry {
            id,
            original: original.to_string(),
            target: target.to_string(),
            example: None,
        }
    }

    fn seeded() -> SqliteRepository {
        let mut repo = SqliteRepository::open_in_memory().unwrap();
        repo.seed_items(
            1,
            "spanish",
            &[
                entry(3, "cat", "gato"),
                entry(1, "dog", "perro"),
                entry(2, "house", "casa"),
                entry(4, "home", "casa"),
            ],
        )
        .unwrap();
        repo
    }

    #[test]
    fn new_items_are_unscheduled() {
        let repo = seeded();
        let item = repo.get_item(&ItemKey::new(1, 1, "spanish")).unwrap().unwrap();
        assert_eq!(item.schedule, Schedule::Unscheduled);
        assert_eq!(item.target, "perro");
    }

    #[test]
    fn schedule_round_trips_through_columns() {
        let repo = seeded();
        let key = ItemKey::new(1, 1, "spanish");
        let schedule = Schedule::Scheduled {
            next_review: now() + Duration::days(1),
            interval_ms: 216_000_000,
            ease_factor: 2.6,
        };

        repo.save_schedule(&key, &schedule).unwrap();

        assert_eq!(repo.get_item(&key).unwrap().unwrap().schedule, schedule);
    }

    #[test]
    fn save_schedule_for_missing_item_fails() {
        let repo = seeded();
        let result = repo.save_schedule(&ItemKey::new(1, 2, "spanish"), &Schedule::Unscheduled);
        assert!(matches!(result, Err(DbError::ItemNotFound { user_id: 2, .. })));
    }

    #[test]
    fn due_items_are_ordered_and_exclude_future() {
        let repo = seeded();
        repo.save_schedule(
            &ItemKey::new(1, 1, "spanish"),
            &Schedule::Scheduled {
                next_review: now() + Duration::seconds(1),
                interval_ms: 1_000,
                ease_factor: 2.5,
            },
        )
        .unwrap();

        let ids: Vec<i64> = repo
            .get_due_items(1, "spanish", now(), None)
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 4]);

        let first = repo.first_due(1, "spanish", now()).unwrap().unwrap();
        assert_eq!(first.id, 2);
    }

    #[test]
    fn pool_is_distinct_by_target() {
        let repo = seeded();
        let pool = repo.get_pool(1, "spanish", "dog", 10).unwrap();
        let pairs: Vec<(i64, &str)> = pool.iter().map(|i| (i.id, i.target.as_str())).collect();
        assert_eq!(pairs, vec![(2, "casa"), (3, "gato")]);
    }

    #[test]
    fn reseeding_keeps_schedule() {
        let mut repo = seeded();
        let key = ItemKey::new(2, 1, "spanish");
        let schedule = Schedule::Scheduled {
            next_review: now(),
            interval_ms: 112_320_000,
            ease_factor: 2.3,
        };
        repo.save_schedule(&key, &schedule).unwrap();

        repo.seed_items(1, "spanish", &[entry(2, "house", "casa")]).unwrap();

        assert_eq!(repo.get_item(&key).unwrap().unwrap().schedule, schedule);
    }

    #[test]
    fn users_and_progress() {
        let mut repo = SqliteRepository::open_in_memory().unwrap();
        assert!(repo.find_user(7).unwrap().is_none());

        repo.append_progress(7, true).unwrap();
        repo.set_language(7, "german").unwrap();
        repo.append_progress(7, false).unwrap();

        let user = repo.find_user(7).unwrap().unwrap();
        assert_eq!(
            user,
            User {
                id: 7,
                language: Some("german".to_string()),
                progress: vec![true, false],
            }
        );
    }

    #[test]
    fn items_by_id_span_languages() {
        let mut repo = seeded();
        repo.seed_items(1, "german", &[entry(1, "dog", "Hund")]).unwrap();
        let items = repo.get_items_by_id(1, 1).unwrap();
        let languages: Vec<&str> = items.iter().map(|i| i.language.as_str()).collect();
        assert_eq!(languages, vec!["german", "spanish"]);
    }

    #[test]
    fn review_writes_schedule_and_progress() {
        let mut repo = seeded();
        let key = ItemKey::new(1, 1, "spanish");
        let schedule = Schedule::Scheduled {
            next_review: now() + Duration::days(1),
            interval_ms: 216_000_000,
            ease_factor: 2.6,
        };

        repo.record_review(&key, schedule.clone(), true).unwrap();

        assert_eq!(repo.get_item(&key).unwrap().unwrap().schedule, schedule);
        assert_eq!(repo.get_user(1).unwrap().unwrap().progress, vec![true]);
    }

    #[test]
    fn failed_review_rolls_back_progress() {
        let mut repo = seeded();
        repo.save_language(1, "spanish").unwrap();

        let result = repo.save_review(
            &ItemKey::new(99, 1, "spanish"),
            &Schedule::Unscheduled,
            true,
        );

        assert!(matches!(result, Err(DbError::ItemNotFound { id: 99, .. })));
        assert!(repo.get_user(1).unwrap().unwrap().progress.is_empty());
    }
}
