//! Admin token acquisition against the identity backend.

use crate::error::{IdentityClientError, Result};
use crate::types::{BackendConfig, TokenResponse};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

/// Token endpoint client for the admin password grant.
pub(crate) struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    config: &'a BackendConfig,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, config: &'a BackendConfig) -> Self {
        Self {
            http,
            base_url,
            config,
        }
    }

    /// URL of the realm's OpenID Connect token endpoint.
    pub(crate) fn token_url(&self) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| IdentityClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend([
                "realms",
                self.config.token_realm(),
                "protocol",
                "openid-connect",
                "token",
            ]);
        Ok(url)
    }

    /// Exchange the admin credentials for a bearer token.
    ///
    /// Every failure, including transport errors, is reported as
    /// [`IdentityClientError::AuthBackend`].
    pub(crate) async fn acquire_token(&self) -> Result<String> {
        let url = self.token_url()?;
        debug!(url = %url, username = %self.config.username, "Requesting admin token");

        let form = [
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];

        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| IdentityClientError::AuthBackend(format!("token endpoint unreachable: {e}")))?;

        let status = response.status();

        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Token endpoint rejected admin credentials");
            return Err(IdentityClientError::AuthBackend(format!(
                "status {}, response: {}",
                status.as_u16(),
                error_text
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            IdentityClientError::AuthBackend(format!("failed to decode token response: {e}"))
        })?;

        let token: TokenResponse = serde_json::from_value(body).map_err(|_| {
            IdentityClientError::AuthBackend("access token not found".to_string())
        })?;

        debug!(expires_in = ?token.expires_in, "Admin token acquired");
        Ok(token.access_token)
    }
}
