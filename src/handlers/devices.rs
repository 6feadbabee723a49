use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::ApiError;

/// List the devices behind the current topology
pub async fn list_devices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Device>>, ApiError> {
    let devices = state.session.devices().await?;
    Ok(Json(devices))
}

/// Select a node: resolve its id to the full device record
pub async fn get_device(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Device>, ApiError> {
    let device = state.session.select(&id).await?;
    Ok(Json(device))
}
