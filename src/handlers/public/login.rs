// handlers/public/login.rs - POST /api/login

use axum::extract::State;

use crate::auth::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::handlers::extract::JsonBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Exchange username (or email) and password for a bearer token
pub async fn post(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<LoginResponse> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::validation_error("Username and password are required", None));
    }

    let response = state.credentials.login(&request).await?;
    Ok(ApiResponse::success(response))
}
