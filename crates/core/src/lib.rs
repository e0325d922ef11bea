//! Domain core for the discussion board: shared types, the error taxonomy,
//! input validation helpers and the comment-tree materializer.

pub mod discussion;
pub mod error;
pub mod input;
pub mod thread;
pub mod types;
