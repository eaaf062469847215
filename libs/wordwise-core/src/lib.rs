//! Core review scheduler shared by the backend and any other transport.
//!
//! Provides:
//! - Spaced repetition scheduling (SM-2 style, millisecond intervals)
//! - Due item selection and distractor generation
//! - The review session orchestrator
//! - Repository traits with an in-memory implementation
//! - Vocabulary list loading

pub mod algorithm;
pub mod distractors;
pub mod error;
pub mod event;
pub mod progress;
pub mod repository;
pub mod selector;
pub mod session;
pub mod types;
pub mod vocabulary;

pub use algorithm::{SchedulingParams, SchedulingResult, Sm2, SpacedRepetitionAlgorithm};
pub use distractors::{distractors, DISTRACTOR_LIMIT, MIN_DISTRACTORS};
pub use error::{EventError, Result, ReviewError, VocabularyError};
pub use event::{AnswerToken, Event, WireEvent};
pub use progress::{recent_marks, Mark, RECENT_PROGRESS};
pub use repository::{
    ItemFields, ItemRepository, MemoryRepository, ReviewRepository, UserRepository,
};
pub use selector::next_due;
pub use session::{
    AbortReason, Notice, Orchestrator, Outcome, Prompt, PromptOption, Reply, Scored, SessionPhase,
};
pub use types::{Item, ItemKey, Schedule, User, Verdict};
pub use vocabulary::{parse_csv, Vocabulary, VocabularyEntry, DEFAULT_LANGUAGES};
