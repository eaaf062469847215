pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordwise_core::{Orchestrator, Vocabulary};

use crate::config::Config;
use crate::db::SqliteRepository;
use crate::error::ApiError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Orchestrator<SqliteRepository>>>,
    pub vocabulary: Arc<Vocabulary>,
}

impl AppState {
    pub fn new(repo: SqliteRepository, vocabulary: Arc<Vocabulary>) -> Self {
        Self::with_orchestrator(Orchestrator::new(repo, vocabulary.clone()), vocabulary)
    }

    pub fn with_orchestrator(
        orchestrator: Orchestrator<SqliteRepository>,
        vocabulary: Arc<Vocabulary>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(orchestrator)),
            vocabulary,
        }
    }

    /// Lock the orchestrator. Every write goes through this lock.
    pub fn session(&self) -> Result<MutexGuard<'_, Orchestrator<SqliteRepository>>, ApiError> {
        self.session
            .lock()
            .map_err(|_| ApiError::Internal("session lock poisoned".to_string()))
    }
}

/// Build the full router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/languages", get(routes::language::list))
        .route("/api/events", post(routes::events::handle))
        // User routes
        .route("/api/users/:user_id/language", put(routes::language::set))
        .route("/api/users/:user_id/review", post(routes::review::start))
        .route("/api/users/:user_id/answer", post(routes::review::answer))
        .route("/api/users/:user_id/progress", get(routes::users::progress))
        .route(
            "/api/users/:user_id/items/:item_id",
            get(routes::users::items),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Loading vocabulary from {}...",
        config.vocabulary_dir.display()
    );
    let vocabulary = Vocabulary::load_dir(&config.vocabulary_dir, &config.languages)
        .context("failed to load vocabulary lists")?;

    tracing::info!("Opening database {}...", config.database_path);
    let repo = SqliteRepository::open(&config.database_path)
        .with_context(|| format!("failed to open database {}", config.database_path))?;

    let state = AppState::new(repo, Arc::new(vocabulary));
    let app = router(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
