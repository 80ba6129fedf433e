use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};

use shared_models::error::AppError;
use shared_utils::extractor::AppQuery;
use shared_utils::AppState;

use crate::models::{AvailabilityQuery, Service, ServiceSummary};
use crate::services::AvailabilityService;

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ServiceSummary>>, AppError> {
    let service = AvailabilityService::new(&state.db);

    let services = service.list_services()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn get_available(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<AvailabilityQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let date = query.date
        .filter(|date| !date.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter 'date' is required".to_string()))?;

    let service = AvailabilityService::new(&state.db);

    let available = service.available_on(&date)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(available))
}
