//! Struct tree and channel data handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

/// Channel data query params
#[derive(Debug, Deserialize)]
pub struct ChannelDataQuery {
    pub path: Option<String>,
}

/// Get the struct tree
pub async fn get_struct_tree(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    Ok(Json(state.store.struct_tree().await?))
}

/// Get the raw document of one channel
pub async fn get_channel_data(
    State(state): State<AppState>,
    Query(query): Query<ChannelDataQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let path = query
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Path parameter is missing".to_string()))?;

    Ok(Json(state.store.channel_document(&path).await?))
}
