use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::{created, ApiError, ApiJson, ApiPath, MessageResponse};

/// List all cabinets (without their hardware)
pub async fn list_cabinets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Cabinet>>, ApiError> {
    let cabinets = state.store.list_cabinets().await?;
    Ok(Json(cabinets))
}

/// Get a single cabinet with the hardware mounted in it
pub async fn get_cabinet(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<CabinetDetail>, ApiError> {
    let detail = state
        .store
        .get_cabinet_detail(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Cabinet"))?;
    Ok(Json(detail))
}

/// Create a new cabinet
pub async fn create_cabinet(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CabinetRequest>,
) -> Result<(StatusCode, Json<Cabinet>), ApiError> {
    let record = req.into_record()?;
    let cabinet = state.store.create_cabinet(&record).await?;
    tracing::info!("Created cabinet {} ({})", cabinet.id, cabinet.name);
    Ok(created(cabinet))
}

/// Update the fields present in the body
pub async fn update_cabinet(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<CabinetRequest>,
) -> Result<Json<Cabinet>, ApiError> {
    let patch = req.into_patch()?;
    let cabinet = state.store.update_cabinet(id, patch).await?;
    Ok(Json(cabinet))
}

/// Delete an empty cabinet
pub async fn delete_cabinet(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_cabinet(id).await?;
    tracing::info!("Deleted cabinet {}", id);
    Ok(MessageResponse::new("Empty cabinet deleted successfully"))
}
