//! Route definitions for discussions and their comments.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comment, discussion};
use crate::state::AppState;

/// Discussion and comment routes. Paths keep their trailing slash.
///
/// ```text
/// GET    /discussions/                                               list_discussions
/// POST   /discussions/                                               create_discussion
/// GET    /discussions/{discussion_id}/                               get_discussion
/// GET    /discussions/{discussion_id}/comments/                      list_discussion_comments
/// POST   /discussions/{discussion_id}/comments/                      create_comment
/// GET    /discussions/{discussion_id}/comments/{comment_id}/replies/ list_comment_replies
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/discussions/",
            get(discussion::list_discussions).post(discussion::create_discussion),
        )
        .route("/discussions/{discussion_id}/", get(discussion::get_discussion))
        .route(
            "/discussions/{discussion_id}/comments/",
            get(comment::list_discussion_comments).post(comment::create_comment),
        )
        .route(
            "/discussions/{discussion_id}/comments/{comment_id}/replies/",
            get(comment::list_comment_replies),
        )
}
