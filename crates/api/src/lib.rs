//! Discussion board API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! tree materialization) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod state;
pub mod thread;
