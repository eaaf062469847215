//! Language selection endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::dispatch;
use crate::AppState;

/// GET /api/languages
pub async fn list(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: state.vocabulary.languages().map(str::to_string).collect(),
    })
}

/// PUT /api/users/:user_id/language
pub async fn set(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    payload: std::result::Result<Json<SetLanguageRequest>, JsonRejection>,
) -> Result<Json<Outcome>> {
    let Json(payload) = payload?;
    dispatch(
        &state,
        WireEvent::SetLanguage {
            user_id,
            language: payload.language,
        },
    )
}
