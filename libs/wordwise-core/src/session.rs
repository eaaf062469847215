//! Review session orchestration.
//!
//! One turn runs `Idle -> PromptBuilt -> AwaitingAnswer -> Scored -> Idle`.
//! `PromptBuilt` and `Scored` only exist inside a single call; between calls a
//! user is either [`SessionPhase::Idle`] or waiting on an answer. Scoring an
//! answer immediately starts the next turn.
//!
//! Nothing fails past this module: empty states become [`Notice`]s and broken
//! turns become [`Reply::Aborted`].

use crate::algorithm::{Sm2, SpacedRepetitionAlgorithm};
use crate::distractors::{distractors, DISTRACTOR_LIMIT};
use crate::error::{Result, ReviewError};
use crate::event::{AnswerToken, Event};
use crate::progress::{recent_marks, Mark, RECENT_PROGRESS};
use crate::repository::ReviewRepository;
use crate::selector::next_due;
use crate::types::{ItemKey, Schedule, Verdict};
use crate::vocabulary::Vocabulary;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOption {
    pub text: String,
    /// Opaque payload returned by the transport when this option is chosen.
    pub token: String,
}

/// Multiple-choice question for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub item_id: i64,
    pub language: String,
    pub original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub options: Vec<PromptOption>,
    pub progress: Vec<Mark>,
}

/// Expected situations where no prompt can be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    NoLanguage,
    NoneDue { language: String },
    InsufficientVocabulary { item_id: i64, language: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbortReason {
    ItemNotFound { item_id: i64, language: String },
    UnknownLanguage { language: String },
    /// The answer does not belong to the prompt the user is waiting on.
    StaleAnswer { item_id: i64, language: String },
    Storage,
}

/// What the transport should show next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Prompt(Prompt),
    Notice(Notice),
    Aborted { reason: AbortReason },
}

/// Result of scoring one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored {
    pub item_id: i64,
    pub language: String,
    pub verdict: Verdict,
    pub correct_answer: String,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scored: Option<Scored>,
    pub reply: Reply,
}

impl Outcome {
    fn reply(reply: Reply) -> Self {
        Self {
            scored: None,
            reply,
        }
    }
}

/// Where a user's session stands between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    AwaitingAnswer { item_id: i64, language: String },
}

/// Runs review turns against a repository.
pub struct Orchestrator<R> {
    repo: R,
    vocabulary: Arc<Vocabulary>,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    rng: StdRng,
    distractor_limit: usize,
    phases: HashMap<i64, SessionPhase>,
}

impl<R> Orchestrator<R>
where
    R: ReviewRepository,
{
    pub fn new(repo: R, vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            repo,
            vocabulary,
            algorithm: Box::new(Sm2::default()),
            rng: StdRng::from_os_rng(),
            distractor_limit: DISTRACTOR_LIMIT,
            phases: HashMap::new(),
        }
    }

    /// Replace the option-order randomness, e.g. with a seeded generator.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn phase(&self, user_id: i64) -> SessionPhase {
        self.phases
            .get(&user_id)
            .cloned()
            .unwrap_or(SessionPhase::Idle)
    }

    pub fn handle(&mut self, event: Event, now: DateTime<Utc>) -> Outcome {
        match event {
            Event::StartReview { user_id } => self.start_review(user_id, now),
            Event::SubmitAnswer { user_id, answer } => self.submit_answer(user_id, &answer, now),
            Event::SetLanguage { user_id, language } => self.set_language(user_id, &language, now),
        }
    }

    pub fn start_review(&mut self, user_id: i64, now: DateTime<Utc>) -> Outcome {
        Outcome::reply(self.next_turn(user_id, now))
    }

    /// Merge the language's vocabulary into the user's items, select it and
    /// start a turn.
    pub fn set_language(&mut self, user_id: i64, language: &str, now: DateTime<Utc>) -> Outcome {
        match self.seed_language(user_id, language) {
            Ok(()) => Outcome::reply(self.next_turn(user_id, now)),
            Err(e) => Outcome::reply(self.fail_turn(user_id, e)),
        }
    }

    pub fn submit_answer(
        &mut self,
        user_id: i64,
        answer: &AnswerToken,
        now: DateTime<Utc>,
    ) -> Outcome {
        match self.score(user_id, answer, now) {
            Ok(scored) => Outcome {
                scored: Some(scored),
                reply: self.next_turn(user_id, now),
            },
            Err(e) => Outcome::reply(self.fail_turn(user_id, e)),
        }
    }

    fn next_turn(&mut self, user_id: i64, now: DateTime<Utc>) -> Reply {
        let reply = match self.build_prompt(user_id, now) {
            Ok(reply) => reply,
            Err(e) => return self.fail_turn(user_id, e),
        };

        match &reply {
            Reply::Prompt(prompt) => {
                self.phases.insert(
                    user_id,
                    SessionPhase::AwaitingAnswer {
                        item_id: prompt.item_id,
                        language: prompt.language.clone(),
                    },
                );
            }
            _ => {
                self.phases.remove(&user_id);
            }
        }
        reply
    }

    fn build_prompt(&mut self, user_id: i64, now: DateTime<Utc>) -> Result<Reply> {
        let user = self.repo.find_user(user_id)?;
        let Some((language, progress)) = user.and_then(|u| u.language.map(|l| (l, u.progress)))
        else {
            return Ok(Reply::Notice(Notice::NoLanguage));
        };

        let Some(item) = next_due(&self.repo, user_id, &language, now)? else {
            tracing::debug!(user_id, %language, "nothing due");
            return Ok(Reply::Notice(Notice::NoneDue { language }));
        };

        let mut texts = distractors(&self.repo, &item, self.distractor_limit)?;
        texts.push(item.target.clone());
        texts.shuffle(&mut self.rng);

        tracing::debug!(user_id, item_id = item.id, options = texts.len(), "prompt built");

        let options = texts
            .into_iter()
            .map(|text| {
                let token = AnswerToken {
                    item_id: item.id,
                    language: language.clone(),
                    correct: item.target.clone(),
                    chosen: text.clone(),
                }
                .encode();
                PromptOption { text, token }
            })
            .collect();

        Ok(Reply::Prompt(Prompt {
            item_id: item.id,
            language,
            original: item.original,
            example: item.example,
            options,
            progress: recent_marks(&progress, RECENT_PROGRESS),
        }))
    }

    fn score(&mut self, user_id: i64, answer: &AnswerToken, now: DateTime<Utc>) -> Result<Scored> {
        let key = ItemKey::new(answer.item_id, user_id, answer.language.clone());
        let item = self
            .repo
            .find_by_id(&key)?
            .ok_or_else(|| ReviewError::ItemNotFound {
                id: key.id,
                user_id,
                language: key.language.clone(),
            })?;

        let awaited = SessionPhase::AwaitingAnswer {
            item_id: key.id,
            language: key.language.clone(),
        };
        if self.phase(user_id) != awaited {
            return Err(ReviewError::StaleAnswer {
                id: key.id,
                language: key.language,
            });
        }

        let verdict = Verdict::judge(&answer.correct, &answer.chosen);
        let result = self.algorithm.schedule(&item.schedule, verdict, now);

        self.repo
            .record_review(&key, result.new_schedule.clone(), verdict.is_correct())?;

        tracing::info!(
            user_id,
            item_id = item.id,
            language = %key.language,
            ?verdict,
            next_review = %result.next_review,
            algorithm = self.algorithm.name(),
            "answer scored"
        );

        Ok(Scored {
            item_id: item.id,
            language: key.language,
            verdict,
            correct_answer: item.target,
            schedule: result.new_schedule,
        })
    }

    fn seed_language(&mut self, user_id: i64, language: &str) -> Result<()> {
        if !self.vocabulary.contains(language) {
            return Err(ReviewError::UnknownLanguage(language.to_string()));
        }
        let entries = self.vocabulary.entries(language).unwrap_or_default();

        self.repo.seed(user_id, language, entries)?;
        self.repo.set_language(user_id, language)?;

        tracing::info!(user_id, language, items = entries.len(), "language selected");
        Ok(())
    }

    /// Convert a failed step into a reply. Every failure except a stale answer
    /// returns the user to idle.
    fn fail_turn(&mut self, user_id: i64, error: ReviewError) -> Reply {
        if !matches!(error, ReviewError::StaleAnswer { .. }) {
            self.phases.remove(&user_id);
        }

        match error {
            ReviewError::InsufficientVocabulary { id, language } => {
                tracing::warn!(
                    user_id,
                    item_id = id,
                    %language,
                    "not enough vocabulary for distractors"
                );
                Reply::Notice(Notice::InsufficientVocabulary {
                    item_id: id,
                    language,
                })
            }
            ReviewError::ItemNotFound { id, language, .. } => {
                tracing::warn!(
                    user_id,
                    item_id = id,
                    %language,
                    "answer for unknown item, turn aborted"
                );
                Reply::Aborted {
                    reason: AbortReason::ItemNotFound {
                        item_id: id,
                        language,
                    },
                }
            }
            ReviewError::StaleAnswer { id, language } => {
                tracing::debug!(user_id, item_id = id, %language, "stale answer ignored");
                Reply::Aborted {
                    reason: AbortReason::StaleAnswer {
                        item_id: id,
                        language,
                    },
                }
            }
            ReviewError::UnknownLanguage(language) => {
                tracing::warn!(user_id, %language, "unknown language requested");
                Reply::Aborted {
                    reason: AbortReason::UnknownLanguage { language },
                }
            }
            ReviewError::Storage(message) => {
                tracing::error!(user_id, error = %message, "storage failure, turn aborted");
                Reply::Aborted {
                    reason: AbortReason::Storage,
                }
            }
        }
    }
}
