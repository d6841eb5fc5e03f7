use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::database::models::{Alumni, AlumniInput, AlumniPatch};
use crate::handlers::extract::JsonBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/alumni/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Alumni> {
    Ok(ApiResponse::success(state.alumni.get(&id).await?))
}

/// POST /api/alumni (admin)
pub async fn post(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AlumniInput>,
) -> ApiResult<Alumni> {
    Ok(ApiResponse::created(state.alumni.create(input).await?))
}

/// PUT /api/alumni/:id (admin) - partial update
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<AlumniPatch>,
) -> ApiResult<Alumni> {
    Ok(ApiResponse::success(state.alumni.update(&id, patch).await?))
}

/// DELETE /api/alumni/:id (admin)
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = state.alumni.delete(&id).await?;
    Ok(ApiResponse::success(json!({ "id": id })))
}
