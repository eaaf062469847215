//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Schedule, Verdict};
use chrono::{DateTime, Utc};

pub use sm2::Sm2;

/// Starting values used the first time an unscheduled item is reviewed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulingParams {
    pub interval_ms: i64,
    pub ease_factor: f64,
}

/// Result of scheduling an item after review.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingResult {
    pub new_schedule: Schedule,
    pub next_review: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Interval and ease an unscheduled item starts from.
    fn initial_params(&self) -> SchedulingParams;

    /// Calculate the next schedule after a review at `now`.
    fn schedule(&self, schedule: &Schedule, verdict: Verdict, now: DateTime<Utc>)
        -> SchedulingResult;
}
