//! Handlers for discussions.
//!
//! Discussions are created once and never edited; the API offers list,
//! create and retrieve.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use discuss_core::error::CoreError;
use discuss_core::types::DbId;
use discuss_db::models::discussion::{CreateDiscussion, Discussion};
use discuss_db::repositories::DiscussionRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a discussion, returning a not-found error if it does not exist.
pub async fn ensure_discussion_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Discussion> {
    DiscussionRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Discussion",
            id,
        })
    })
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /discussions/
///
/// List all discussions, newest first.
pub async fn list_discussions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let discussions = DiscussionRepo::list(&state.pool).await?;
    Ok(Json(discussions))
}

/// POST /discussions/
///
/// Create a new discussion.
pub async fn create_discussion(
    State(state): State<AppState>,
    payload: Result<Json<CreateDiscussion>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(mut input) = payload?;
    input.normalize();
    input.validate()?;

    let discussion = DiscussionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        discussion_id = discussion.id,
        user = %discussion.user,
        "Discussion created"
    );

    Ok((StatusCode::CREATED, Json(discussion)))
}

/// GET /discussions/{discussion_id}/
///
/// Retrieve a single discussion.
pub async fn get_discussion(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let discussion = ensure_discussion_exists(&state.pool, id).await?;
    Ok(Json(discussion))
}
