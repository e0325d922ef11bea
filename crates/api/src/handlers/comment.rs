//! Handlers for discussion comments and their reply trees.
//!
//! Tree endpoints validate the `?level=` filter and the scope (discussion,
//! or comment within a discussion) before delegating to [`crate::thread`],
//! whose output is returned as-is.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use discuss_core::discussion::parse_level_filter;
use discuss_core::error::CoreError;
use discuss_core::types::DbId;
use discuss_db::models::comment::{Comment, CreateComment};
use discuss_db::repositories::{CommentRepo, DiscussionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::discussion::ensure_discussion_exists;
use crate::query::TreeParams;
use crate::state::AppState;
use crate::thread;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a comment that must belong to `discussion_id`.
///
/// A comment of another discussion is reported exactly like a missing one.
async fn ensure_comment_in_discussion(
    pool: &sqlx::PgPool,
    discussion_id: DbId,
    comment_id: DbId,
) -> AppResult<Comment> {
    CommentRepo::find_in_discussion(pool, discussion_id, comment_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id: comment_id,
            })
        })
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /discussions/{discussion_id}/comments/?level=<int>
///
/// Every comment of the discussion as a flat tree, optionally cut at `level`.
pub async fn list_discussion_comments(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    params: TreeParams,
) -> AppResult<impl IntoResponse> {
    let Path(discussion_id) = path?;
    let max_level = parse_level_filter(params.level.as_deref())?;

    if !DiscussionRepo::exists(&state.pool, discussion_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Discussion",
            id: discussion_id,
        }));
    }

    let tree = thread::materialize_discussion_tree(&state.pool, discussion_id, max_level).await?;
    Ok(Json(tree))
}

/// POST /discussions/{discussion_id}/comments/
///
/// Create a top-level comment or, with `parent`, a reply. The discussion
/// is taken from the path.
pub async fn create_comment(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<CreateComment>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(discussion_id) = path?;
    ensure_discussion_exists(&state.pool, discussion_id).await?;

    let Json(mut input) = payload?;
    input.normalize();
    input.validate()?;

    if let Some(parent_id) = input.parent {
        let parent = CommentRepo::find_in_discussion(&state.pool, discussion_id, parent_id).await?;
        if parent.is_none() {
            return Err(AppError::Core(CoreError::field(
                "parent",
                format!("comment {parent_id} does not exist in this discussion"),
            )));
        }
    }

    let comment = CommentRepo::create(&state.pool, discussion_id, &input).await?;

    tracing::info!(
        discussion_id,
        comment_id = comment.id,
        parent_id = ?comment.parent_id,
        "Comment created"
    );

    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /discussions/{discussion_id}/comments/{comment_id}/replies/
///
/// All transitive replies of a comment as a flat tree. The comment itself
/// is not included.
pub async fn list_comment_replies(
    State(state): State<AppState>,
    path: Result<Path<(DbId, DbId)>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path((discussion_id, comment_id)) = path?;
    ensure_comment_in_discussion(&state.pool, discussion_id, comment_id).await?;

    let tree = thread::materialize_comment_subtree(&state.pool, comment_id).await?;
    Ok(Json(tree))
}
