//! Review endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::dispatch;
use crate::AppState;

/// POST /api/users/:user_id/review
pub async fn start(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Outcome>> {
    dispatch(&state, WireEvent::StartReview { user_id })
}

/// POST /api/users/:user_id/answer
pub async fn answer(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    payload: std::result::Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<Outcome>> {
    let Json(payload) = payload?;
    dispatch(
        &state,
        WireEvent::SubmitAnswer {
            user_id,
            token: payload.token,
        },
    )
}
