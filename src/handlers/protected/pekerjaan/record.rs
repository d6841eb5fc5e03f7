use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::database::models::{Job, JobInput, JobPatch};
use crate::error::ApiError;
use crate::handlers::extract::JsonBody;
use crate::state::AppState;

/// GET /api/pekerjaan/:id - UUID or legacy integer id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Job>, ApiError> {
    Ok(Json(state.jobs.get(&id).await?))
}

/// POST /api/pekerjaan (admin)
pub async fn post(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<JobInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let job = state.jobs.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Job created", "id": job.id })),
    ))
}

/// PUT /api/pekerjaan/:id (admin)
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<JobPatch>,
) -> Result<Json<Value>, ApiError> {
    state.jobs.update(&id, patch).await?;
    Ok(Json(json!({ "message": "Job updated" })))
}

/// DELETE /api/pekerjaan/:id (admin)
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    state.jobs.delete(&id).await?;
    Ok(Json(json!({ "message": "Job deleted" })))
}
