use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn booking_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/booking", post(handlers::create_booking));

    let protected_routes = Router::new()
        .route("/booking", get(handlers::get_bookings))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
