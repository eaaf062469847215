//! Next due item selection.

use crate::error::Result;
use crate::repository::ItemRepository;
use crate::types::Item;
use chrono::{DateTime, Utc};

/// Pick the due item with the smallest id for a user and language.
///
/// Returns `None` when nothing is due.
pub fn next_due<R>(
    repo: &R,
    user_id: i64,
    language: &str,
    now: DateTime<Utc>,
) -> Result<Option<Item>>
where
    R: ItemRepository + ?Sized,
{
    match repo.first_due(user_id, language, now)? {
        Some(item) if item.is_due(now) => Ok(Some(item)),
        Some(item) => {
            tracing::warn!(
                item_id = item.id,
                user_id,
                language,
                "repository returned an item that is not due, rescanning"
            );
            Ok(repo
                .find_due(user_id, language, now)?
                .into_iter()
                .filter(|i| i.is_due(now))
                .min_by_key(|i| i.id))
        }
        None => Ok(None),
    }
}
