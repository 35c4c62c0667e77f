//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Validate request shapes before the crypto core ever sees them.
//! - Inject shared application state (`AppState`) into handlers.
//! - Serve the OpenAPI document describing the API.

pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
