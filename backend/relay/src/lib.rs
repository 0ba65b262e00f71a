//! CodeReview relay HTTP API server.
//!
//! Accepts a code payload, prefixes the fixed review instruction, forwards
//! both to the configured LLM provider and returns the raw review text.

pub mod health_api;
pub mod review_api;
pub mod server;

pub use review_api::ApiError;
pub use server::{build_router, start_server, RelayState};
