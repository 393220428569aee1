/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use identity_client::{BackendConfig, IdentityClient};
use ms_user_server::{create_router, ApiTokenAuth, AppState};
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::MockServer;

pub const API_TOKEN: &str = "test-api-token";
pub const BACKEND_TOKEN: &str = "backend-admin-token";

pub const USERS_PATH: &str = "/admin/realms/master/users";
pub const GROUPS_PATH: &str = "/admin/realms/master/groups";

/// Router wired to a fresh mock identity backend.
///
/// The identity client already holds `BACKEND_TOKEN`, so the token endpoint
/// is only hit by tests that mount it.
pub async fn create_test_app() -> (Router, MockServer) {
    let mock_server = MockServer::start().await;

    let identity =
        IdentityClient::new(BackendConfig::new(mock_server.uri(), "master", "admin", "admin"))
            .unwrap();
    identity.set_token(BACKEND_TOKEN).await;

    let app_state = AppState::new(Arc::new(identity));
    let auth = Arc::new(ApiTokenAuth::new(API_TOKEN));

    (create_router(app_state, auth), mock_server)
}

/// Authenticated request against the administration API.
pub fn api_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(format!("/ms-user/v1{uri}"))
        .header(header::AUTHORIZATION, format!("Bearer {API_TOKEN}"));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

pub mod fixtures {
    use serde_json::{json, Value};

    pub fn john() -> Value {
        json!({
            "id": "u1",
            "username": "johndoe",
            "email": "john@example.com",
            "firstName": "John",
            "lastName": "Doe"
        })
    }

    pub fn jane() -> Value {
        json!({
            "id": "u2",
            "username": "janedoe",
            "email": "jane@example.com"
        })
    }
}
