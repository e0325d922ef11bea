//! Comment models and the materialized tree row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use discuss_core::input::TextInput;
use discuss_core::thread::{Leveled, ThreadNode};
use discuss_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
///
/// Serialized with the wire names `discussion` and `parent` for the owning
/// discussion and parent comment ids.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    #[serde(rename = "discussion")]
    pub discussion_id: DbId,
    #[sqlx(rename = "user_handle")]
    pub user: String,
    #[serde(rename = "parent")]
    pub parent_id: Option<DbId>,
    pub content: String,
    pub created_at: Timestamp,
}

impl ThreadNode for Comment {
    fn node_id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }

    fn discussion_id(&self) -> DbId {
        self.discussion_id
    }
}

/// A comment with its computed `level` and `path`.
pub type ThreadedComment = Leveled<Comment>;

/// DTO for creating a new comment. The owning discussion comes from the
/// request path, never from the body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateComment {
    #[serde(default)]
    #[validate(custom(function = "discuss_core::input::validate_user"))]
    pub user: TextInput,
    #[serde(default)]
    #[validate(custom(function = "discuss_core::input::validate_content"))]
    pub content: TextInput,
    pub parent: Option<DbId>,
}

impl CreateComment {
    pub fn normalize(&mut self) {
        self.user.trim();
        self.content.trim();
    }
}
