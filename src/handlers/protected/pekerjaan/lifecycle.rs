use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// PUT /api/pekerjaan/:id/soft-delete
pub async fn soft_delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    state.jobs.soft_delete(&id).await?;
    Ok(Json(json!({ "message": "Job moved to trash" })))
}

/// PUT /api/pekerjaan/:id/restore
pub async fn restore(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    state.jobs.restore(&id).await?;
    Ok(Json(json!({ "message": "Job restored" })))
}

/// DELETE /api/pekerjaan/hard/:id - permanent, open to any authenticated user
pub async fn hard_delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    state.jobs.delete(&id).await?;
    Ok(Json(json!({ "message": "Job permanently deleted" })))
}
