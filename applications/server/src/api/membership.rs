/// Membership API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use identity_client::{Group, User};

/// GET /ms-user/v1/users/:id/groups
pub async fn list_user_groups(
    Path(user_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Group>>> {
    let groups = app_state.identity.list_user_groups(&user_id).await?;
    Ok(Json(groups))
}

/// GET /ms-user/v1/groups/:id/users
pub async fn list_group_users(
    Path(group_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<User>>> {
    let users = app_state.identity.list_group_users(&group_id).await?;
    Ok(Json(users))
}

/// PUT /ms-user/v1/users/:id/groups/:group_id
pub async fn add_user_to_group(
    Path((user_id, group_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state
        .identity
        .add_user_to_group(&user_id, &group_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /ms-user/v1/users/:id/groups/:group_id
pub async fn remove_user_from_group(
    Path((user_id, group_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state
        .identity
        .remove_user_from_group(&user_id, &group_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /ms-user/v1/users/email/:email/groups/:group_id
/// Add the single user with this email to the group
pub async fn add_user_to_group_by_email(
    Path((email, group_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state
        .identity
        .add_user_to_group_by_email(&email, &group_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
