//! Core types for the review scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of an item for scheduling purposes.
///
/// The same vocabulary `id` recurs once per user and language, so all three
/// parts are needed to address a single schedule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub id: i64,
    pub user_id: i64,
    pub language: String,
}

impl ItemKey {
    pub fn new(id: i64, user_id: i64, language: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            language: language.into(),
        }
    }
}

/// Scheduling state of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Schedule {
    /// Never reviewed; due immediately.
    Unscheduled,
    Scheduled {
        next_review: DateTime<Utc>,
        interval_ms: i64,
        ease_factor: f64,
    },
}

impl Default for Schedule {
    fn default() -> Self {
        Self::Unscheduled
    }
}

impl Schedule {
    /// Whether an item with this schedule may be reviewed at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::Unscheduled => true,
            Self::Scheduled { next_review, .. } => *next_review <= now,
        }
    }

    pub fn next_review(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Unscheduled => None,
            Self::Scheduled { next_review, .. } => Some(*next_review),
        }
    }
}

/// One vocabulary entry's scheduling record for a (user, language) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub user_id: i64,
    pub language: String,
    pub original: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub schedule: Schedule,
}

impl Item {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.id, self.user_id, self.language.clone())
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.schedule.is_due(now)
    }
}

/// A learner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// One entry per completed review turn, oldest first.
    #[serde(default)]
    pub progress: Vec<bool>,
}

impl User {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            language: None,
            progress: Vec::new(),
        }
    }
}

/// Outcome of comparing the learner's choice with the correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    /// Exact comparison of the chosen option text against the correct text.
    pub fn judge(correct: &str, chosen: &str) -> Self {
        if correct == chosen {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl From<bool> for Verdict {
    fn from(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }
}
