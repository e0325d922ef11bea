//! Repository for the `discussions` table.

use sqlx::PgPool;
use discuss_core::types::DbId;

use crate::models::discussion::{CreateDiscussion, Discussion};

/// Column list for discussions queries.
const COLUMNS: &str = "id, user_handle, title, created_at";

/// Provides create and read operations for discussions.
pub struct DiscussionRepo;

impl DiscussionRepo {
    /// List all discussions, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Discussion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discussions ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .fetch_all(pool)
            .await
    }

    /// Create a new discussion, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDiscussion,
    ) -> Result<Discussion, sqlx::Error> {
        let query = format!(
            "INSERT INTO discussions (user_handle, title)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(input.user.as_str())
            .bind(input.title.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a discussion by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Discussion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM discussions WHERE id = $1");
        sqlx::query_as::<_, Discussion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a discussion exists without loading it.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM discussions WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
