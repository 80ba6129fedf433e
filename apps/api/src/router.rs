use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use booking_cell::router::booking_routes;
use doctor_cell::router::doctor_routes;
use service_cell::router::service_routes;
use shared_utils::AppState;
use user_cell::router::user_routes;

pub const LIVENESS_MESSAGE: &str = "Doctors Portal API is running!";

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { LIVENESS_MESSAGE }))
        .merge(service_routes(state.clone()))
        .merge(booking_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .merge(doctor_routes(state))
}
