pub mod discussion;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                                     liveness + database check
/// /discussions/                                               list, create
/// /discussions/{discussion_id}/                               get
/// /discussions/{discussion_id}/comments/                      tree (?level=), create
/// /discussions/{discussion_id}/comments/{comment_id}/replies/ subtree
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(discussion::router())
}
