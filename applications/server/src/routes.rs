/// HTTP route table
use crate::{api, middleware, services::ApiTokenAuth, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Base path of the administration API.
pub const API_BASE: &str = "/ms-user/v1";

pub fn create_router(app_state: AppState, auth: Arc<ApiTokenAuth>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(api::health::health));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Users
        .route(
            "/users",
            get(api::users::list_users).post(api::users::create_user),
        )
        .route("/users/search", get(api::users::search_users))
        .route(
            "/users/:id",
            get(api::users::get_user)
                .put(api::users::update_user)
                .delete(api::users::delete_user),
        )
        // Membership
        .route("/users/:id/groups", get(api::membership::list_user_groups))
        .route(
            "/users/:id/groups/:group_id",
            put(api::membership::add_user_to_group)
                .delete(api::membership::remove_user_from_group),
        )
        .route(
            "/users/email/:email/groups/:group_id",
            put(api::membership::add_user_to_group_by_email),
        )
        .route("/groups/:id/users", get(api::membership::list_group_users))
        // Groups
        .route(
            "/groups",
            get(api::groups::list_groups).post(api::groups::create_group),
        )
        .route(
            "/groups/with-users",
            get(api::groups::list_groups_with_users),
        )
        .route(
            "/groups/:id",
            get(api::groups::get_group)
                .put(api::groups::update_group)
                .delete(api::groups::delete_group),
        )
        .layer(axum_middleware::from_fn_with_state(
            auth,
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest(API_BASE, protected_routes)
        .layer(
            TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
