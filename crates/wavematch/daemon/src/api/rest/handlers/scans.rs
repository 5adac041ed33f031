//! Scan submission handler

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use crate::scan::{ScanAck, ScanRequest};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use wavematch_types::ScanId;

/// Acknowledgement of a submitted scan
#[derive(Debug, Serialize)]
pub struct SubmitDataResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_id: Option<ScanId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tasks: Option<u64>,
}

impl From<ScanAck> for SubmitDataResponse {
    fn from(ack: ScanAck) -> Self {
        match ack {
            ScanAck::Started {
                scan_id,
                total_tasks,
            } => Self {
                message: "Data processing started".to_string(),
                scan_id: Some(scan_id),
                total_tasks: Some(total_tasks),
            },
            ScanAck::NothingToProcess => Self {
                message: "No data to process".to_string(),
                scan_id: None,
                total_tasks: None,
            },
        }
    }
}

/// Submit a scan; progress and results follow on the event stream
pub async fn submit_data(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> ApiResult<Json<SubmitDataResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let ack = state.scans.submit(request).await?;
    Ok(Json(ack.into()))
}
