//! Storage trait definitions

use crate::error::StorageError;
use async_trait::async_trait;
use serde::Deserialize;
use wavematch_types::TimeSeries;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// On-disk layout of one channel's samples
#[derive(Debug, Deserialize)]
pub struct ChannelDocument {
    #[serde(rename = "X_value")]
    pub x_value: Vec<f64>,

    #[serde(rename = "Y_value")]
    pub y_value: Vec<f64>,
}

impl ChannelDocument {
    /// Pair the columns into a series, dropping the unpaired tail of the
    /// longer one.
    pub fn into_series(self, path: &str) -> TimeSeries {
        let (series, dropped) = TimeSeries::from_columns_truncating(self.x_value, self.y_value);
        if dropped > 0 {
            tracing::warn!(
                path,
                dropped,
                kept = series.len(),
                "Channel columns differ in length, truncating"
            );
        }
        series
    }
}

/// Read access to channel data and the channel tree
#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// The struct tree document that lists the available channels
    async fn struct_tree(&self) -> StorageResult<serde_json::Value>;

    /// Raw JSON document stored under `path`
    async fn channel_document(&self, path: &str) -> StorageResult<serde_json::Value>;

    /// Load the series stored under `path`
    async fn load_series(&self, path: &str) -> StorageResult<TimeSeries> {
        let value = self.channel_document(path).await?;
        let document: ChannelDocument = serde_json::from_value(value)?;
        Ok(document.into_series(path))
    }
}
