//! Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};

// Re-export shared types from wordwise-core
pub use wordwise_core::{Item, Mark, Outcome, SessionPhase, WireEvent};

// === API Request Types ===

/// Set language request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLanguageRequest {
    pub language: String,
}

/// Submit answer request; `token` is copied from the chosen option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub token: String,
}

// === API Response Types ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
}

/// Progress summary for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub user_id: i64,
    pub language: Option<String>,
    pub recent: Vec<Mark>,
    pub rendered: String,
    pub total: usize,
    pub correct: usize,
    pub session: SessionPhase,
}

/// Stored copies of one vocabulary item for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub user_id: i64,
    pub item_id: i64,
    pub items: Vec<Item>,
}
