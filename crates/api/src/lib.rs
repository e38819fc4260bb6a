//! Video catalog API server library.
//!
//! Exposes the building blocks (config, state, error handling, payload
//! readers, routes) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod state;
