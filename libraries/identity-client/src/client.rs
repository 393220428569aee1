//! Main identity backend client.

use crate::auth::AuthClient;
use crate::error::{IdentityClientError, Result};
use crate::types::BackendConfig;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, Request, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

/// Client for the identity backend's admin REST API.
///
/// The client owns the admin session token. Every outbound call reads the
/// current token; a 401 answer triggers one token refresh and one retry.
/// Resource operations (users, groups, memberships) are built on
/// [`IdentityClient::execute`].
///
/// # Example
///
/// ```ignore
/// use identity_client::{BackendConfig, IdentityClient};
///
/// let config = BackendConfig::new("http://localhost:8080", "master", "admin", "admin");
/// let client = IdentityClient::connect(config).await?;
///
/// let groups = client.list_groups_with_users().await?;
/// println!("Found {} groups", groups.len());
/// ```
pub struct IdentityClient {
    http: Client,
    base_url: Url,
    config: BackendConfig,
    token: RwLock<Option<String>>,
    refresh_lock: Mutex<()>,
}

impl std::fmt::Debug for IdentityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityClient")
            .field("base_url", &self.base_url.as_str())
            .field("realm", &self.config.realm)
            .finish_non_exhaustive()
    }
}

impl IdentityClient {
    /// Create a new client with the given configuration.
    ///
    /// No network I/O happens here; the client starts without a token.
    pub fn new(config: BackendConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(IdentityClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/');
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(IdentityClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url =
            Url::parse(url).map_err(|e| IdentityClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ms-user/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
            token: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Create a client and eagerly fetch the admin token.
    ///
    /// A failed initial fetch is logged and the client starts without a
    /// token; the first backend call then refreshes it on demand.
    pub async fn connect(config: BackendConfig) -> Result<Self> {
        let client = Self::new(config)?;

        match client.acquire_token().await {
            Ok(token) => {
                *client.token.write().await = Some(token);
                info!(url = %client.base_url, realm = %client.config.realm, "Connected to identity backend");
            }
            Err(e) => {
                error!(error = %e, "Failed to get admin token from identity backend");
            }
        }

        Ok(client)
    }

    /// Backend base URL (trailing slashes removed).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Realm whose users and groups are managed.
    pub fn realm(&self) -> &str {
        &self.config.realm
    }

    /// Current admin session token.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Replace the admin session token.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Run the admin password grant without storing the result.
    pub async fn acquire_token(&self) -> Result<String> {
        AuthClient::new(&self.http, &self.base_url, &self.config)
            .acquire_token()
            .await
    }

    /// Fetch a new admin token and store it.
    pub async fn refresh_token(&self) -> Result<String> {
        let stale = self.token().await;
        self.refresh_token_if_stale(stale.as_deref()).await
    }

    /// Refresh unless another caller already replaced `stale`.
    ///
    /// Refreshes are serialised; a waiter that finds a different token in
    /// place after taking the lock reuses it instead of fetching again.
    async fn refresh_token_if_stale(&self, stale: Option<&str>) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.token.read().await.as_deref() {
            if Some(current) != stale {
                debug!("Token already refreshed by a concurrent request");
                return Ok(current.to_string());
            }
        }

        let token = self.acquire_token().await?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    /// Send a request with the admin token attached.
    ///
    /// On 401 the response is discarded, the token refreshed, and the
    /// request retried exactly once. The retried response is returned as-is,
    /// whatever its status.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let retry = request.try_clone();
        let token = self.token().await;

        let response = self.send_with_token(request, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(retry) = retry else {
            warn!("Request body cannot be replayed; returning 401 without retry");
            return Ok(response);
        };
        drop(response);

        info!("Token expired. Refreshing token and retrying request.");
        let fresh = self.refresh_token_if_stale(token.as_deref()).await?;

        self.send_with_token(retry, Some(&fresh)).await
    }

    async fn send_with_token(&self, mut request: Request, token: Option<&str>) -> Result<Response> {
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                IdentityClientError::AuthBackend("token is not a valid header value".to_string())
            })?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        debug!(method = %request.method(), url = %request.url(), "Calling identity backend");
        Ok(self.http.execute(request).await?)
    }

    /// URL under `{base}/admin/realms/{realm}` with each segment percent-encoded.
    pub(crate) fn admin_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| IdentityClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["admin", "realms", self.config.realm.as_str()])
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Build, execute, and check the status against `accepted`.
    pub(crate) async fn send(
        &self,
        builder: RequestBuilder,
        accepted: &[StatusCode],
        operation: &'static str,
    ) -> Result<Response> {
        let response = self.execute(builder.build()?).await?;
        expect_status(response, accepted, operation).await
    }

    /// GET `url`, accept only 200, decode the body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &'static str,
    ) -> Result<T> {
        let response = self.send(builder, &[StatusCode::OK], operation).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            error!(operation, body = %String::from_utf8_lossy(&body), "Unable to decode backend response");
            IdentityClientError::Parse(format!("{operation}: {e}"))
        })
    }
}

/// Map a status outside `accepted` to [`IdentityClientError::BackendOperation`].
async fn expect_status(
    response: Response,
    accepted: &[StatusCode],
    operation: &'static str,
) -> Result<Response> {
    let status = response.status();
    if accepted.contains(&status) {
        return Ok(response);
    }

    let body = response.bytes().await?;
    let body = serde_json::from_slice::<serde_json::Value>(&body).ok();

    warn!(operation, status = %status, "Identity backend rejected request");
    Err(IdentityClientError::BackendOperation {
        operation,
        status: status.as_u16(),
        body,
    })
}
