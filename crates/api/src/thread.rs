//! Store-backed entry points for comment-tree materialization.
//!
//! Loads the candidate rows for a scope with a single query, runs the
//! closure from [`discuss_core::thread`] and logs any rows it had to skip.
//! Neither function checks that its root exists; an unknown discussion or
//! comment simply yields an empty tree. Existence checks belong to the
//! handlers.

use discuss_core::thread::{materialize, Materialized, ThreadRoot};
use discuss_core::types::DbId;
use discuss_db::models::comment::{Comment, ThreadedComment};
use discuss_db::repositories::CommentRepo;
use discuss_db::DbPool;

use crate::error::AppResult;

/// Every comment of a discussion as a flat, path-ordered tree.
///
/// `max_level` drops rows deeper than the limit after materialization.
pub async fn materialize_discussion_tree(
    pool: &DbPool,
    discussion_id: DbId,
    max_level: Option<u32>,
) -> AppResult<Vec<ThreadedComment>> {
    let rows = CommentRepo::list_for_discussion(pool, discussion_id).await?;
    let tree = materialize(rows, ThreadRoot::Discussion(discussion_id), max_level)?;
    Ok(finish(tree, discussion_id))
}

/// All transitive replies of a comment, excluding the comment itself.
pub async fn materialize_comment_subtree(
    pool: &DbPool,
    comment_id: DbId,
) -> AppResult<Vec<ThreadedComment>> {
    let rows = CommentRepo::list_for_subtree(pool, comment_id).await?;
    let Some(discussion_id) = rows
        .iter()
        .find(|c| c.id == comment_id)
        .map(|c| c.discussion_id)
    else {
        return Ok(Vec::new());
    };

    let root = ThreadRoot::Replies {
        discussion_id,
        comment_id,
    };
    let tree = materialize(rows, root, None)?;
    Ok(finish(tree, discussion_id))
}

fn finish(tree: Materialized<Comment>, discussion_id: DbId) -> Vec<ThreadedComment> {
    if !tree.skipped.is_empty() {
        tracing::warn!(
            discussion_id,
            skipped = ?tree.skipped,
            "Comments skipped while materializing thread"
        );
    }
    tracing::debug!(discussion_id, rows = tree.rows.len(), "Thread materialized");
    tree.rows
}
