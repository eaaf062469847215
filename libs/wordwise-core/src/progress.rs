//! Recent review outcomes for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcomes shown alongside each prompt.
pub const RECENT_PROGRESS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Pass,
    Fail,
}

impl From<bool> for Mark {
    fn from(correct: bool) -> Self {
        if correct {
            Self::Pass
        } else {
            Self::Fail
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("✅"),
            Self::Fail => f.write_str("❌"),
        }
    }
}

/// The last `count` outcomes, oldest first.
pub fn recent_marks(progress: &[bool], count: usize) -> Vec<Mark> {
    let start = progress.len().saturating_sub(count);
    progress[start..].iter().map(|&c| Mark::from(c)).collect()
}

/// Render marks as a compact string, e.g. `✅❌✅`.
pub fn render(marks: &[Mark]) -> String {
    marks.iter().map(Mark::to_string).collect()
}
