use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
    middleware,
};

use shared_utils::extractor::{admin_middleware, auth_middleware};
use shared_utils::AppState;

use crate::handlers;

pub fn user_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/admin/{email}", get(handlers::get_admin_status))
        .route("/user/{email}", put(handlers::upsert_user));

    // Layers run outermost-last: the token is checked before the stored role.
    let admin_routes = Router::new()
        .route("/users", get(handlers::list_users))
        .route("/user/admin/{email}", put(handlers::make_admin))
        .layer(middleware::from_fn_with_state(state.clone(), admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
