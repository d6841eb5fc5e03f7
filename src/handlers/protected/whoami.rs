// handlers/protected/whoami.rs - GET /api/auth/whoami

use axum::Extension;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Echo the identity carried by the caller's token
pub async fn get(Extension(user): Extension<AuthUser>) -> ApiResult<AuthUser> {
    Ok(ApiResponse::success(user))
}
