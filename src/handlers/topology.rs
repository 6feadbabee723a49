use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::ApiError;

/// Get the current topology laid out in the current orientation
pub async fn get_topology(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RenderedTopology>, ApiError> {
    let topology = state.session.current().await?;
    Ok(Json(topology))
}

/// Re-fetch devices and rebuild the whole topology
pub async fn refresh_topology(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RenderedTopology>, ApiError> {
    let topology = state
        .session
        .refresh()
        .await
        .map_err(|e| ApiError::bad_gateway(format!("{:#}", e)))?;
    Ok(Json(topology))
}

/// Flip between top-bottom and left-right layout
pub async fn toggle_orientation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RenderedTopology>, ApiError> {
    let topology = state.session.toggle_orientation().await?;
    Ok(Json(topology))
}
