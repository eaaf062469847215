//! Inbound events and answer tokens.
//!
//! Transports hand the core an [`Event`]. Answer tokens travel through the
//! transport as opaque strings attached to each option and are decoded here,
//! once, into a strict schema.

use crate::error::EventError;
use serde::{Deserialize, Serialize};

/// Payload carried by an answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerToken {
    pub item_id: i64,
    pub language: String,
    pub correct: String,
    pub chosen: String,
}

impl AnswerToken {
    /// Encode as an opaque string for the transport.
    pub fn encode(&self) -> String {
        // Serializing a struct of integers and strings cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decode and validate a token produced by [`AnswerToken::encode`].
    pub fn decode(token: &str) -> Result<Self, EventError> {
        let answer: Self = serde_json::from_str(token)?;
        if answer.language.trim().is_empty() {
            return Err(EventError::InvalidToken("empty language".to_string()));
        }
        if answer.correct.is_empty() {
            return Err(EventError::InvalidToken("empty correct answer".to_string()));
        }
        Ok(answer)
    }
}

/// Event as received from a transport, before token decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireEvent {
    StartReview { user_id: i64 },
    SubmitAnswer { user_id: i64, token: String },
    SetLanguage { user_id: i64, language: String },
}

/// Decoded inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartReview { user_id: i64 },
    SubmitAnswer { user_id: i64, answer: AnswerToken },
    SetLanguage { user_id: i64, language: String },
}

impl Event {
    pub fn user_id(&self) -> i64 {
        match self {
            Self::StartReview { user_id }
            | Self::SubmitAnswer { user_id, .. }
            | Self::SetLanguage { user_id, .. } => *user_id,
        }
    }
}

impl TryFrom<WireEvent> for Event {
    type Error = EventError;

    fn try_from(wire: WireEvent) -> Result<Self, Self::Error> {
        Ok(match wire {
            WireEvent::StartReview { user_id } => Self::StartReview { user_id },
            WireEvent::SubmitAnswer { user_id, token } => Self::SubmitAnswer {
                user_id,
                answer: AnswerToken::decode(&token)?,
            },
            WireEvent::SetLanguage { user_id, language } => {
                let language = language.trim().to_lowercase();
                if language.is_empty() {
                    return Err(EventError::InvalidToken("empty language".to_string()));
                }
                Self::SetLanguage { user_id, language }
            }
        })
    }
}
