use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::database::models::FileRecord;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/file - `{ count, data }`; admins see every file
pub async fn list(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let files = state.files.list(user.caller()).await?;
    Ok(Json(json!({ "count": files.len(), "data": files })))
}

/// GET /api/file/:id - owner or admin
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<FileRecord>, ApiError> {
    Ok(Json(state.files.get(user.caller(), &id).await?))
}

/// DELETE /api/file/:id - owner or admin
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.files.delete(user.caller(), &id).await?;
    Ok(Json(json!({ "message": "File deleted" })))
}
