#![allow(dead_code)]

//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring an in-memory SQLite repository into the router
//! - A small fixed vocabulary
//! - Helpers for walking through review turns

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

use wordwise_backend::db::SqliteRepository;
use wordwise_backend::{router, AppState};
use wordwise_core::Orchestrator;

/// Test context containing application state and the router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a new test context over an empty in-memory database.
    pub fn new() -> Self {
        let vocabulary = Arc::new(fixtures::vocabulary());
        let repo = SqliteRepository::open_in_memory().expect("Failed to open in-memory database");
        let orchestrator =
            Orchestrator::new(repo, vocabulary.clone()).with_rng(StdRng::seed_from_u64(7));

        let state = AppState::with_orchestrator(orchestrator, vocabulary);
        let app = router(state.clone());

        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to build test server")
    }
}

/// Select a language for a user and return the outcome body.
pub async fn select_language(server: &TestServer, user_id: i64, language: &str) -> Value {
    let response = server
        .put(&format!("/api/users/{}/language", user_id))
        .json(&json!({ "language": language }))
        .await;
    response.assert_status_ok();
    response.json()
}

/// Submit the option whose text matches `text`.
pub async fn answer_with(server: &TestServer, user_id: i64, prompt: &Value, text: &str) -> Value {
    let token = option_token(prompt, text);
    let response = server
        .post(&format!("/api/users/{}/answer", user_id))
        .json(&json!({ "token": token }))
        .await;
    response.assert_status_ok();
    response.json()
}

/// Token of the option with the given text.
pub fn option_token(prompt: &Value, text: &str) -> String {
    prompt["options"]
        .as_array()
        .expect("prompt has options")
        .iter()
        .find(|option| option["text"] == text)
        .and_then(|option| option["token"].as_str())
        .unwrap_or_else(|| panic!("no option {:?} in {}", text, prompt))
        .to_string()
}

/// Option texts of a prompt in display order.
pub fn option_texts(prompt: &Value) -> Vec<String> {
    prompt["options"]
        .as_array()
        .expect("prompt has options")
        .iter()
        .filter_map(|option| option["text"].as_str().map(str::to_string))
        .collect()
}
