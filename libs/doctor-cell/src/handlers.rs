use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use shared_models::error::AppError;
use shared_models::store::{DeleteResult, InsertResult};
use shared_utils::extractor::AppJson;
use shared_utils::AppState;

use crate::models::Doctor;
use crate::services::DoctorService;

// Admin access is enforced by the router layers.

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let doctor_service = DoctorService::new(&state.db);

    let doctors = doctor_service.list_doctors().await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn add_doctor(
    State(state): State<Arc<AppState>>,
    AppJson(doctor): AppJson<Doctor>,
) -> Result<Json<InsertResult>, AppError> {
    let doctor_service = DoctorService::new(&state.db);

    let result = doctor_service.add_doctor(doctor).await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn remove_doctor(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<DeleteResult>, AppError> {
    let doctor_service = DoctorService::new(&state.db);

    let result = doctor_service.remove_doctor(&email).await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}
