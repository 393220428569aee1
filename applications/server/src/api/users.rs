/// Users API routes
use crate::{
    api::extract::JsonBody,
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use identity_client::User;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub email: Option<String>,
}

/// GET /ms-user/v1/users
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = app_state.identity.list_users().await?;
    Ok(Json(users))
}

/// POST /ms-user/v1/users
/// Create a user; responds with the submitted user and any id the backend reported
pub async fn create_user(
    State(app_state): State<AppState>,
    JsonBody(user): JsonBody<User>,
) -> Result<(StatusCode, Json<User>)> {
    let user = app_state.identity.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /ms-user/v1/users/search?email=
pub async fn search_users(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<User>>> {
    let email = query
        .email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| ServerError::BadRequest("email query parameter is required".to_string()))?;

    let users = app_state.identity.search_users_by_email(&email).await?;
    Ok(Json(users))
}

/// GET /ms-user/v1/users/:id
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<User>> {
    let user = app_state.identity.get_user(&id).await?;
    Ok(Json(user))
}

/// PUT /ms-user/v1/users/:id
pub async fn update_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    JsonBody(user): JsonBody<User>,
) -> Result<Json<User>> {
    let user = app_state.identity.update_user(&id, user).await?;
    Ok(Json(user))
}

/// DELETE /ms-user/v1/users/:id
pub async fn delete_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state.identity.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
