//! SM-2 style scheduling in milliseconds.
//!
//! The interval grows by the ease factor after a correct answer and by a fixed
//! lapse multiplier after an incorrect one. The next review is always placed
//! one current interval after the review, truncated to whole milliseconds.

use super::{SchedulingParams, SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{Schedule, Verdict};
use chrono::{DateTime, Duration, SubsecRound, Utc};

pub const DAY_MS: i64 = 86_400_000;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_interval_ms: i64,
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub ease_bonus: f64,
    pub ease_penalty: f64,
    pub lapse_multiplier: f64,
    pub maximum_interval_ms: i64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_interval_ms: DAY_MS,
            initial_ease: 2.5,
            minimum_ease: 1.3,
            ease_bonus: 0.1,
            ease_penalty: 0.2,
            lapse_multiplier: 1.3,
            maximum_interval_ms: 36_500 * DAY_MS,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_params(&self) -> SchedulingParams {
        SchedulingParams {
            interval_ms: self.initial_interval_ms,
            ease_factor: self.initial_ease,
        }
    }

    fn schedule(
        &self,
        schedule: &Schedule,
        verdict: Verdict,
        now: DateTime<Utc>,
    ) -> SchedulingResult {
        let (interval_ms, ease_factor) = match schedule {
            Schedule::Unscheduled => {
                let params = self.initial_params();
                (params.interval_ms, params.ease_factor)
            }
            Schedule::Scheduled {
                interval_ms,
                ease_factor,
                ..
            } => (*interval_ms, *ease_factor),
        };
        let interval_ms = self.clamp_interval(interval_ms);

        // Schedules are stored as epoch milliseconds.
        let now = now.trunc_subsecs(3);
        let next_review = now
            .checked_add_signed(Duration::milliseconds(interval_ms))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let (multiplier, new_ease) = match verdict {
            Verdict::Correct => (ease_factor, ease_factor + self.ease_bonus),
            Verdict::Incorrect => (self.lapse_multiplier, ease_factor - self.ease_penalty),
        };
        let new_interval = self.clamp_interval((interval_ms as f64 * multiplier).round() as i64);

        SchedulingResult {
            new_schedule: Schedule::Scheduled {
                next_review,
                interval_ms: new_interval,
                ease_factor: new_ease.max(self.minimum_ease),
            },
            next_review,
        }
    }
}

impl Sm2 {
    fn clamp_interval(&self, interval_ms: i64) -> i64 {
        interval_ms.clamp(1, self.maximum_interval_ms)
    }
}
