use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::ApiError;

/// Hardware count per status label
pub async fn status_breakdown(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusCounts>, ApiError> {
    let counts = state.store.status_counts().await?;
    Ok(Json(counts))
}

/// Used versus total rack units per cabinet
pub async fn occupancy(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CabinetOccupancy>>, ApiError> {
    let report = state.store.occupancy().await?;
    Ok(Json(report))
}
