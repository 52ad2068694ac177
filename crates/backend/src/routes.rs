use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::require_auth;
use crate::handlers;
use crate::state::AppState;

/// Routes mounted under `/api`; every one requires a verified caller.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/sync-user", post(handlers::sync_user))
        .route(
            "/lists",
            get(handlers::list_lists).post(handlers::create_list),
        )
        .route(
            "/lists/:id",
            put(handlers::rename_list).delete(handlers::delete_list),
        )
        .route("/lists/:id/tasks", post(handlers::create_task))
        .route(
            "/tasks/:id",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
