//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub(crate) mod handlers;
mod server;

pub use handlers::{ApiError, AppState};
pub use server::{HttpServer, ServerOptions};
