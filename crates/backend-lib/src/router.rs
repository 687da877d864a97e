// ============================
// chatter-backend/src/router.rs
// ============================
//! HTTP routes.
use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, route_not_found, users};
use crate::store::UserStore;
use crate::AppState;

/// Create the application router
pub fn create_router<S: UserStore + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/health-check", get(health::health_check))
        .route("/user", get(users::list_users::<S>))
        .route("/user/register", post(users::register::<S>))
        .route("/user/login", post(users::login::<S>))
        .route(
            "/user/profile",
            get(users::profile::<S>)
                .patch(users::update_profile::<S>)
                .delete(users::delete_profile::<S>),
        )
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
