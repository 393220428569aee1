/// Authentication middleware
use crate::{error::ServerError, services::ApiTokenAuth};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that checks the static bearer token in the Authorization header
pub async fn auth_middleware(
    State(auth): State<Arc<ApiTokenAuth>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .map(|h| h.to_str().unwrap_or_default());

    auth.verify_header(header).map_err(|e| {
        tracing::warn!(path = %request.uri().path(), "Rejected request: {}", e);
        e
    })?;

    Ok(next.run(request).await)
}
