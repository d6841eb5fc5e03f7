use axum::{
    extract::{Query, State},
    Json,
};

use crate::database::models::Alumni;
use crate::error::ApiError;
use crate::filter::{ListingEnvelope, ListingQuery};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/alumni - every alumni record
pub async fn get(State(state): State<AppState>) -> ApiResult<Vec<Alumni>> {
    Ok(ApiResponse::success(state.alumni.list_all().await?))
}

/// GET /api/alumni/pag - ?page&limit&sortBy&order&search
pub async fn paginated(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingEnvelope<Alumni>>, ApiError> {
    Ok(Json(state.alumni.list_page(&query).await?))
}
