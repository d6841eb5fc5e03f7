use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::YearCount;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/pekerjaan/tahun/:year (admin) - jobs started in that calendar year
pub async fn by_year(State(state): State<AppState>, Path(year): Path<String>) -> Result<Json<YearCount>, ApiError> {
    Ok(Json(state.jobs.count_for_year(&year).await?))
}
