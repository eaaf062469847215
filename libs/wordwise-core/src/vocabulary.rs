//! Vocabulary lists used to seed a learner's items.
//!
//! # Format
//! One CSV file per language, named `<language>_frequency_list.csv`:
//! ```text
//! id,original,target,example
//! 1,the,el,el perro
//! 2,be,ser,
//! ```
//! The `example` column is optional.

use crate::error::VocabularyError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Languages offered when none are configured.
pub const DEFAULT_LANGUAGES: &[&str] = &["spanish", "german", "french", "italian", "russian"];

/// One row of a frequency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: i64,
    pub original: String,
    pub target: String,
    #[serde(default)]
    pub example: Option<String>,
}

/// Parse a frequency list.
pub fn parse_csv(content: &str) -> Result<Vec<VocabularyEntry>, VocabularyError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut entries = Vec::new();
    let mut seen_ids = HashSet::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let mut entry: VocabularyEntry = record.deserialize(Some(&headers))?;

        if entry.original.is_empty() {
            return Err(VocabularyError::EmptyField {
                field: "original",
                line,
            });
        }
        if entry.target.is_empty() {
            return Err(VocabularyError::EmptyField {
                field: "target",
                line,
            });
        }
        if !seen_ids.insert(entry.id) {
            return Err(VocabularyError::DuplicateId { id: entry.id, line });
        }

        entry.example = entry.example.filter(|e| !e.is_empty());
        entries.push(entry);
    }

    Ok(entries)
}

/// Lookup table of vocabulary lists keyed by language.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    lists: BTreeMap<String, Vec<VocabularyEntry>>,
}

impl Vocabulary {
    pub fn from_lists<I, S>(lists: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<VocabularyEntry>)>,
        S: Into<String>,
    {
        Self {
            lists: lists
                .into_iter()
                .map(|(language, entries)| (language.into(), entries))
                .collect(),
        }
    }

    /// Load `<dir>/<language>_frequency_list.csv` for each language.
    pub fn load_dir<P, S>(dir: P, languages: &[S]) -> Result<Self, VocabularyError>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let mut lists = BTreeMap::new();

        for language in languages {
            let language = language.as_ref();
            let path = dir
                .as_ref()
                .join(format!("{}_frequency_list.csv", language));
            let content = fs::read_to_string(&path).map_err(|source| VocabularyError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let entries = parse_csv(&content)?;
            tracing::info!(language, count = entries.len(), "loaded vocabulary list");
            lists.insert(language.to_string(), entries);
        }

        Ok(Self { lists })
    }

    /// Languages in alphabetical order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    pub fn entries(&self, language: &str) -> Option<&[VocabularyEntry]> {
        self.lists.get(language).map(Vec::as_slice)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.lists.contains_key(language)
    }
}
