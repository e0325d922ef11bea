//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod discussion_repo;

pub use comment_repo::CommentRepo;
pub use discussion_repo::DiscussionRepo;
