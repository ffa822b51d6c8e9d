use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::{created, ApiError, ApiJson, ApiPath, MessageResponse};

/// List all hardware units, each with its cabinet
pub async fn list_hardware(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HardwareUnit>>, ApiError> {
    let units = state.store.list_hardware().await?;
    Ok(Json(units))
}

/// Get a single hardware unit by ID
pub async fn get_hardware(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<HardwareUnit>, ApiError> {
    let unit = state
        .store
        .get_hardware(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Hardware unit"))?;
    Ok(Json(unit))
}

/// Mount a new hardware unit in an existing cabinet
pub async fn create_hardware(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<HardwareRequest>,
) -> Result<(StatusCode, Json<HardwareUnit>), ApiError> {
    let record = req.into_record()?;
    let unit = state.store.create_hardware(&record).await?;
    tracing::info!(
        "Created hardware unit {} (serial {}) in cabinet {}",
        unit.id,
        unit.serial_number,
        unit.cabinet.id
    );
    Ok(created(unit))
}

/// Update the fields present in the body.
/// How an omitted `service_date` is treated depends on configuration.
pub async fn update_hardware(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<HardwareRequest>,
) -> Result<Json<HardwareUnit>, ApiError> {
    let patch = req.into_patch(state.config.clear_service_date_on_omit)?;
    let unit = state.store.update_hardware(id, patch).await?;
    Ok(Json(unit))
}

/// Delete a hardware unit
pub async fn delete_hardware(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_hardware(id).await?;
    tracing::info!("Deleted hardware unit {}", id);
    Ok(MessageResponse::new("Hardware unit deleted successfully"))
}
