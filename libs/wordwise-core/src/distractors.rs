//! Wrong-answer generation for multiple-choice prompts.

use crate::error::{Result, ReviewError};
use crate::repository::ItemRepository;
use crate::types::Item;
use std::collections::HashSet;

/// Distractors requested per prompt.
pub const DISTRACTOR_LIMIT: usize = 3;

/// Fewest distractors a prompt may be built with.
pub const MIN_DISTRACTORS: usize = 1;

/// Sample up to `limit` wrong answers from the item's user and language.
///
/// Candidates sharing the item's `original` are excluded, as is the item's own
/// `target`. Returned strings are unique.
pub fn distractors<R>(repo: &R, item: &Item, limit: usize) -> Result<Vec<String>>
where
    R: ItemRepository + ?Sized,
{
    // One extra in case the pool holds a homonym with the same target.
    let pool = repo.find_pool(item.user_id, &item.language, &item.original, limit + 1)?;

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(item.target.as_str());

    let picked: Vec<String> = pool
        .iter()
        .filter(|candidate| candidate.original != item.original)
        .map(|candidate| candidate.target.as_str())
        .filter(|target| seen.insert(*target))
        .take(limit)
        .map(str::to_string)
        .collect();

    if picked.len() < MIN_DISTRACTORS {
        return Err(ReviewError::InsufficientVocabulary {
            id: item.id,
            language: item.language.clone(),
        });
    }

    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use crate::types::ItemKey;
    use crate::vocabulary::VocabularyEntry;
    use pretty_assertions::assert_eq;

    fn entry(id: i64, original: &str, target: &str) -> VocabularyEntry {
        VocabularyEntry {
            id,
            original: original.to_string(),
            target: target.to_string(),
            example: None,
        }
    }

    fn repo_with(entries: &[VocabularyEntry]) -> MemoryRepository {
        let mut repo = MemoryRepository::new();
        repo.seed(1, "spanish", entries).unwrap();
        repo
    }

    fn item(repo: &MemoryRepository, id: i64) -> Item {
        repo.find_by_id(&ItemKey::new(id, 1, "spanish"))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn returns_three_from_a_large_pool() {
        let repo = repo_with(&[
            entry(1, "dog", "perro"),
            entry(2, "cat", "gato"),
            entry(3, "house", "casa"),
            entry(4, "tree", "árbol"),
            entry(5, "water", "agua"),
        ]);
        let picked = distractors(&repo, &item(&repo, 1), DISTRACTOR_LIMIT).unwrap();
        assert_eq!(picked, vec!["gato", "casa", "árbol"]);
    }

    #[test]
    fn never_includes_own_pair_or_duplicates() {
        let repo = repo_with(&[
            entry(1, "dog", "perro"),
            entry(2, "dog", "can"),
            entry(3, "hound", "perro"),
            entry(4, "cat", "gato"),
            entry(5, "kitty", "gato"),
        ]);
        let picked = distractors(&repo, &item(&repo, 1), DISTRACTOR_LIMIT).unwrap();

        assert_eq!(picked, vec!["gato"]);
    }

    #[test]
    fn single_other_item_yields_single_distractor() {
        let repo = repo_with(&[entry(1, "dog", "perro"), entry(2, "cat", "gato")]);
        let picked = distractors(&repo, &item(&repo, 1), DISTRACTOR_LIMIT).unwrap();
        assert_eq!(picked, vec!["gato"]);
    }

    #[test]
    fn empty_pool_is_insufficient() {
        let repo = repo_with(&[entry(1, "dog", "perro"), entry(2, "dog", "can")]);
        let result = distractors(&repo, &item(&repo, 1), DISTRACTOR_LIMIT);
        assert!(matches!(
            result,
            Err(ReviewError::InsufficientVocabulary { id: 1, .. })
        ));
    }
}
