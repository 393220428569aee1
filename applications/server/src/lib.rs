//! ms-user server library
//!
//! HTTP front for user, group and membership administration, backed by the
//! identity backend's admin REST API.
//!
//! This library exposes the router and its components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use routes::create_router;
pub use services::auth::ApiTokenAuth;
pub use state::AppState;
