use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::database::models::Job;
use crate::error::ApiError;
use crate::filter::{ListingEnvelope, ListingQuery};
use crate::state::AppState;

/// GET /api/pekerjaan - every job, trashed included, newest first
pub async fn get(State(state): State<AppState>) -> Result<Json<Vec<Job>>, ApiError> {
    Ok(Json(state.jobs.list_all().await?))
}

/// GET /api/pekerjaan/pag
pub async fn paginated(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingEnvelope<Job>>, ApiError> {
    Ok(Json(state.jobs.list_page(&query).await?))
}

/// GET /api/pekerjaan/trash
pub async fn trash(State(state): State<AppState>) -> Result<Json<Vec<Job>>, ApiError> {
    Ok(Json(state.jobs.list_trashed().await?))
}

/// GET /api/pekerjaan/alumni/:alumni_id (admin)
pub async fn by_alumni(
    State(state): State<AppState>,
    Path(alumni_id): Path<String>,
) -> Result<Json<Vec<Job>>, ApiError> {
    Ok(Json(state.jobs.list_by_alumni(&alumni_id).await?))
}
