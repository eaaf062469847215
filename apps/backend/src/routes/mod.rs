//! HTTP route handlers

pub mod events;
pub mod language;
pub mod review;
pub mod users;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use chrono::Utc;
use wordwise_core::{Event, WireEvent};

use crate::error::{ApiError, Result};
use crate::models::Outcome;
use crate::AppState;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Decode a wire event and run it through the orchestrator.
pub(crate) fn dispatch(state: &AppState, wire: WireEvent) -> Result<Json<Outcome>> {
    let event = Event::try_from(wire)?;
    let outcome = state.session()?.handle(event, Utc::now());
    Ok(Json(outcome))
}
