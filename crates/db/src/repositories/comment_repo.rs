//! Repository for the `comments` table.
//!
//! Besides plain create/find, this loads the candidate rows that the tree
//! materializer in `discuss_core::thread` expands. Both tree scopes load the
//! whole owning discussion in one query so the closure runs in-process and
//! never follows a parent link outside that discussion.

use sqlx::PgPool;
use discuss_core::types::DbId;

use crate::models::comment::{Comment, CreateComment};

/// Column list for comments queries.
const COLUMNS: &str = "id, discussion_id, user_handle, parent_id, content, created_at";

/// Provides create and read operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Create a comment in `discussion_id`, returning the created row.
    ///
    /// The composite foreign key on `(parent_id, discussion_id)` rejects a
    /// parent from another discussion with a foreign key violation.
    pub async fn create(
        pool: &PgPool,
        discussion_id: DbId,
        input: &CreateComment,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (discussion_id, user_handle, parent_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(discussion_id)
            .bind(input.user.as_str())
            .bind(input.parent)
            .bind(input.content.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID, only if it belongs to `discussion_id`.
    pub async fn find_in_discussion(
        pool: &PgPool,
        discussion_id: DbId,
        id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments WHERE id = $1 AND discussion_id = $2"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(discussion_id)
            .fetch_optional(pool)
            .await
    }

    /// Load every comment of a discussion, ordered by id.
    pub async fn list_for_discussion(
        pool: &PgPool,
        discussion_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE discussion_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(discussion_id)
            .fetch_all(pool)
            .await
    }

    /// Load every comment of the discussion that owns `comment_id`.
    ///
    /// Returns an empty list when the comment does not exist.
    pub async fn list_for_subtree(
        pool: &PgPool,
        comment_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE discussion_id = (SELECT discussion_id FROM comments WHERE id = $1)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(comment_id)
            .fetch_all(pool)
            .await
    }
}
