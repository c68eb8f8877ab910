//! # vortex-api
//!
//! The service surface minus the HTTP framework: typed request/response
//! models, credential resolution, and async handler functions an HTTP layer
//! wires one-to-one onto routes. Every error leaving a handler carries a
//! stable machine-readable code and a correlation id that also appears in
//! the server-side logs.

pub mod auth;
pub mod error;
pub mod feedback;
pub mod handlers;
pub mod models;
pub mod state;

pub use auth::{resolve_user_context, BearerClaims, Credentials};
pub use error::{ApiError, ErrorCode};
pub use state::{AppState, SearchResources};
