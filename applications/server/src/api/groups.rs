/// Groups API routes
use crate::{api::extract::JsonBody, error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use identity_client::{Group, GroupWithUsers};

/// GET /ms-user/v1/groups
pub async fn list_groups(State(app_state): State<AppState>) -> Result<Json<Vec<Group>>> {
    let groups = app_state.identity.list_groups().await?;
    Ok(Json(groups))
}

/// POST /ms-user/v1/groups
pub async fn create_group(
    State(app_state): State<AppState>,
    JsonBody(group): JsonBody<Group>,
) -> Result<(StatusCode, Json<Group>)> {
    let group = app_state.identity.create_group(group).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /ms-user/v1/groups/with-users
/// Every group with its current members; fails as a whole if any group fails
pub async fn list_groups_with_users(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<GroupWithUsers>>> {
    let groups = app_state.identity.list_groups_with_users().await?;
    Ok(Json(groups))
}

/// GET /ms-user/v1/groups/:id
pub async fn get_group(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Group>> {
    let group = app_state.identity.get_group(&id).await?;
    Ok(Json(group))
}

/// PUT /ms-user/v1/groups/:id
pub async fn update_group(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    JsonBody(group): JsonBody<Group>,
) -> Result<Json<Group>> {
    let group = app_state.identity.update_group(&id, group).await?;
    Ok(Json(group))
}

/// DELETE /ms-user/v1/groups/:id
pub async fn delete_group(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state.identity.delete_group(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
