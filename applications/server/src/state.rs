/// Shared application state
use identity_client::IdentityClient;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub identity: Arc<IdentityClient>,
}

impl AppState {
    pub fn new(identity: Arc<IdentityClient>) -> Self {
        Self { identity }
    }
}
