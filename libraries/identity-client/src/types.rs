//! Types for identity backend requests and responses.

use serde::{Deserialize, Serialize};

/// Client id used for the admin password grant unless overridden.
pub const DEFAULT_CLIENT_ID: &str = "admin-cli";

/// Configuration for connecting to the identity backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g., "http://localhost:8080")
    pub url: String,
    /// Realm whose users and groups are managed
    pub realm: String,
    /// Realm the admin credentials belong to (defaults to `realm`)
    pub token_realm: Option<String>,
    /// Administrator username
    pub username: String,
    /// Administrator password
    pub password: String,
    /// Client id sent with the password grant
    pub client_id: String,
}

impl BackendConfig {
    /// Create a config for the given backend, realm and admin credentials.
    pub fn new(
        url: impl Into<String>,
        realm: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            realm: realm.into(),
            token_realm: None,
            username: username.into(),
            password: password.into(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }

    /// Authenticate the admin against a different realm than the managed one.
    pub fn with_token_realm(mut self, token_realm: impl Into<String>) -> Self {
        self.token_realm = Some(token_realm.into());
        self
    }

    /// Realm used for the token endpoint.
    pub fn token_realm(&self) -> &str {
        self.token_realm.as_deref().unwrap_or(&self.realm)
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Password-grant token response. Only the access token is used.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

// =============================================================================
// Entity Types
// =============================================================================

/// A user as stored by the identity backend.
///
/// `id` is absent on creation input and assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// A group as stored by the identity backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// A group with its members at the time of the query.
///
/// Not transactionally consistent with concurrent membership changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupWithUsers {
    pub group: Group,
    pub users: Vec<User>,
}
