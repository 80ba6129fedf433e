use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use notification_cell::dispatch_confirmation;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;
use shared_models::store::InsertResult;
use shared_utils::extractor::{AppJson, AppQuery};
use shared_utils::AppState;

use crate::models::{Booking, BookingError, BookingQuery};
use crate::services::BookingService;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotOwner => AppError::Forbidden("Forbidden Access".to_string()),
            other => AppError::Database(other.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppQuery(query): AppQuery<BookingQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let patient = query.patient
        .ok_or_else(|| AppError::BadRequest("Query parameter 'patient' is required".to_string()))?;

    let service = BookingService::new(&state.db);
    let bookings = service.list_for_patient(&user.email, &patient).await?;

    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AppJson(booking): AppJson<Booking>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state.db);

    let outcome = service.create_booking(booking).await?;

    if !outcome.created {
        return Ok(Json(json!({
            "success": false,
            "booking": outcome.record
        })));
    }

    dispatch_confirmation(state.notifier.clone(), outcome.record.confirmation());

    Ok(Json(json!({
        "success": true,
        "result": InsertResult::new(outcome.record.id)
    })))
}
