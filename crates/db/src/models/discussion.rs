//! Discussion models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use discuss_core::input::TextInput;
use discuss_core::types::{DbId, Timestamp};

/// A row from the `discussions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Discussion {
    pub id: DbId,
    #[sqlx(rename = "user_handle")]
    pub user: String,
    pub title: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new discussion.
///
/// Fields accept any JSON value so that missing, `null` or wrongly typed
/// input is reported as a field error by [`Validate`] rather than rejected
/// by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateDiscussion {
    #[serde(default)]
    #[validate(custom(function = "discuss_core::input::validate_user"))]
    pub user: TextInput,
    #[serde(default)]
    #[validate(custom(function = "discuss_core::input::validate_title"))]
    pub title: TextInput,
}

impl CreateDiscussion {
    /// Strip surrounding whitespace from every free-text field.
    pub fn normalize(&mut self) {
        self.user.trim();
        self.title.trim();
    }
}
