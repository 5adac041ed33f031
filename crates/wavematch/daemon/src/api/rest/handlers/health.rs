//! Health and banner handlers

use crate::api::rest::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Plain-text banner served at the root
pub async fn index() -> &'static str {
    "Hello World!"
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
    })
}
