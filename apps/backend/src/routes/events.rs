//! Generic event entry point

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::dispatch;
use crate::AppState;

/// POST /api/events
///
/// Accepts any tagged event, e.g. `{"type": "start_review", "user_id": 1}`.
pub async fn handle(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WireEvent>, JsonRejection>,
) -> Result<Json<Outcome>> {
    let Json(event) = payload?;
    dispatch(&state, event)
}
