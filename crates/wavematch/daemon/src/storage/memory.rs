//! In-memory storage implementation

use super::traits::*;
use crate::error::StorageError;
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory channel storage for development and testing
#[derive(Debug, Default)]
pub struct InMemoryChannelStore {
    documents: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    struct_tree: Arc<RwLock<Option<serde_json::Value>>>,
}

impl InMemoryChannelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &str) -> String {
        path.strip_prefix('/').unwrap_or(path).to_string()
    }

    /// Store a raw document under `path`
    pub async fn insert_document(&self, path: &str, document: serde_json::Value) {
        self.documents.write().await.insert(Self::key(path), document);
    }

    /// Store a channel in the on-disk `X_value`/`Y_value` layout
    pub async fn insert_series(&self, path: &str, x: Vec<f64>, y: Vec<f64>) {
        self.insert_document(path, json!({ "X_value": x, "Y_value": y }))
            .await;
    }

    pub async fn set_struct_tree(&self, tree: serde_json::Value) {
        *self.struct_tree.write().await = Some(tree);
    }
}

#[async_trait]
impl ChannelStore for InMemoryChannelStore {
    async fn struct_tree(&self) -> StorageResult<serde_json::Value> {
        self.struct_tree
            .read()
            .await
            .clone()
            .ok_or_else(|| StorageError::NotFound("struct tree".to_string()))
    }

    async fn channel_document(&self, path: &str) -> StorageResult<serde_json::Value> {
        self.documents
            .read()
            .await
            .get(&Self::key(path))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}
