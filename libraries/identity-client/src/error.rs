//! Error types for the identity backend client.

use thiserror::Error;

/// Errors that can occur when talking to the identity backend.
#[derive(Error, Debug)]
pub enum IdentityClientError {
    /// Network or connection failure
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Token endpoint unreachable, rejected the credentials or sent a malformed body
    #[error("Failed to obtain admin token: {0}")]
    AuthBackend(String),

    /// Resource endpoint answered with a status outside the accepted set
    #[error("{}", backend_message(.operation, .status, .body.as_ref()))]
    BackendOperation {
        operation: &'static str,
        status: u16,
        /// The backend's error body, when it was JSON
        body: Option<serde_json::Value>,
    },

    /// No user matched an email lookup
    #[error("No user found with email {0}")]
    NotFound(String),

    /// More than one user matched an email lookup
    #[error("Multiple users ({matches}) found with email {email}")]
    AmbiguousMatch { email: String, matches: usize },

    /// Member listing failed for one group of a composite listing
    #[error("Failed to get users for group {group_id}: {source}")]
    GroupMembers {
        group_id: String,
        #[source]
        source: Box<IdentityClientError>,
    },

    /// Invalid backend URL
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Success response whose body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

fn backend_message(operation: &str, status: &u16, body: Option<&serde_json::Value>) -> String {
    match body {
        Some(body) => format!("Failed to {operation}: status {status}: {body}"),
        None => format!("Failed to {operation}: status {status}, unable to parse error"),
    }
}

impl IdentityClientError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport_error",
            Self::AuthBackend(_) => "auth_backend_error",
            Self::BackendOperation { .. } => "backend_error",
            Self::NotFound(_) => "not_found",
            Self::AmbiguousMatch { .. } => "ambiguous_match",
            Self::GroupMembers { source, .. } => source.code(),
            Self::InvalidUrl(_) => "invalid_url",
            Self::Parse(_) => "parse_error",
        }
    }

    /// Backend status code, if the backend answered at all.
    pub fn backend_status(&self) -> Option<u16> {
        match self {
            Self::BackendOperation { status, .. } => Some(*status),
            Self::GroupMembers { source, .. } => source.backend_status(),
            _ => None,
        }
    }
}

/// Result type for identity client operations.
pub type Result<T> = std::result::Result<T, IdentityClientError>;
