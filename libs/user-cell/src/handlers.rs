use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;
use shared_models::store::UpdateResult;
use shared_utils::jwt::issue_token;
use shared_utils::extractor::AppJson;
use shared_utils::AppState;

use crate::models::{AdminStatus, SignInProfile};
use crate::services::UserService;

/// Sign-in upsert. Always answers with a fresh token for `email`.
#[axum::debug_handler]
pub async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    AppJson(profile): AppJson<SignInProfile>,
) -> Result<Json<TokenResponse<UpdateResult>>, AppError> {
    let service = UserService::new(&state.db);

    let result = service.upsert_user(&email, profile)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let token = issue_token(&email, &state.config.access_token_secret)
        .map_err(AppError::Internal)?;

    debug!("Issued access token for {}", email);
    Ok(Json(TokenResponse { result, token }))
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, AppError> {
    let service = UserService::new(&state.db);

    let users = service.list_users()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn get_admin_status(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>, AppError> {
    let service = UserService::new(&state.db);

    let admin = service.is_admin(&email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(AdminStatus { admin }))
}

#[axum::debug_handler]
pub async fn make_admin(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<UpdateResult>, AppError> {
    let service = UserService::new(&state.db);

    let result = service.promote_to_admin(&email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}
