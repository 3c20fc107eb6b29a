//! Local HTTP API for the tracker front end.
//!
//! Exposes the dashboard, add-medication form and reports views as JSON
//! endpoints under `/api/`. The router is composable:
//! `tracker_api_router()` returns a `Router` that can be mounted on any
//! axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::tracker_api_router;
pub use server::{start_api_server_on, ApiServer, ApiSession};
pub use types::ApiContext;
