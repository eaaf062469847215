//! User progress and item lookup

use axum::{
    extract::{Path, State},
    Json,
};
use wordwise_core::progress::render;
use wordwise_core::{recent_marks, ItemRepository, UserRepository, RECENT_PROGRESS};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/users/:user_id/progress
pub async fn progress(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ProgressResponse>> {
    let session = state.session()?;
    let user = session
        .repository()
        .find_user(user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User {}", user_id)))?;

    let recent = recent_marks(&user.progress, RECENT_PROGRESS);
    let correct = user.progress.iter().filter(|&&c| c).count();

    Ok(Json(ProgressResponse {
        user_id,
        language: user.language,
        rendered: render(&recent),
        recent,
        total: user.progress.len(),
        correct,
        session: session.phase(user_id),
    }))
}

/// GET /api/users/:user_id/items/:item_id
pub async fn items(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(i64, i64)>,
) -> Result<Json<ItemsResponse>> {
    let session = state.session()?;
    let repo = session.repository();

    if repo.find_user(user_id)?.is_none() {
        return Err(ApiError::NotFound(format!("User {}", user_id)));
    }

    let items = repo.find_by_item_id(user_id, item_id)?;
    if items.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Item {} for user {}",
            item_id, user_id
        )));
    }

    Ok(Json(ItemsResponse {
        user_id,
        item_id,
        items,
    }))
}
