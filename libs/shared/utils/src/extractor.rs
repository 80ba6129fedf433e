use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, State},
    http::Request,
    middleware::Next,
    response::Response,
    body::Body,
};
use tracing::{debug, warn};

use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::jwt::validate_token;
use crate::state::AppState;

/// `Json` whose rejections answer `400 {"message": ...}` like every other error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query` counterpart of [`AppJson`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

const UNAUTHORIZED: &str = "Unauthorized Access";
const FORBIDDEN: &str = "Forbidden Access";

/// Verifies `Authorization: Bearer <token>` and attaches the decoded [`AuthUser`].
///
/// A missing header is `401`; anything wrong with the credential itself is `403`.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED.to_string()))?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Forbidden(FORBIDDEN.to_string()))?;

    let user = validate_token(token, &state.config.access_token_secret)
        .map_err(|e| {
            debug!("Rejecting bearer token: {}", e);
            AppError::Forbidden(FORBIDDEN.to_string())
        })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Lets the request through only when the stored role of the caller is admin.
/// Must be layered inside [`auth_middleware`].
pub async fn admin_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = extract_user(&request)?;

    authorize_admin(&state, &user).await?;

    Ok(next.run(request).await)
}

/// Checks the stored role for `user`. A missing user record is treated as non-admin.
pub async fn authorize_admin(state: &AppState, user: &AuthUser) -> Result<(), AppError> {
    let account = state.db.find_user(&user.email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    match account {
        Some(account) if account.is_admin() => Ok(()),
        _ => {
            warn!("Admin operation refused for {}", user.email);
            Err(AppError::Forbidden(FORBIDDEN.to_string()))
        }
    }
}

pub fn extract_user<B>(request: &Request<B>) -> Result<AuthUser, AppError> {
    request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED.to_string()))
}
