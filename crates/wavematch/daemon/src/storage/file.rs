//! Data-directory backed channel storage

use super::traits::*;
use crate::error::StorageError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Channel files read from a data directory.
///
/// Every path is taken relative to `data_dir`; a single leading `/` is
/// ignored. Paths that would leave the directory are rejected.
#[derive(Debug, Clone)]
pub struct FileChannelStore {
    data_dir: PathBuf,
    struct_tree_file: String,
}

impl FileChannelStore {
    pub fn new(data_dir: impl Into<PathBuf>, struct_tree_file: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            struct_tree_file: struct_tree_file.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(path.strip_prefix('/').unwrap_or(path));
        if relative.as_os_str().is_empty() {
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StorageError::InvalidPath(path.to_string()));
                }
            }
        }

        Ok(self.data_dir.join(relative))
    }

    async fn read_json(&self, path: &str) -> StorageResult<serde_json::Value> {
        let full_path = self.resolve(path)?;
        let bytes = tokio::fs::read(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
            _ => StorageError::Io(e),
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ChannelStore for FileChannelStore {
    async fn struct_tree(&self) -> StorageResult<serde_json::Value> {
        self.read_json(&self.struct_tree_file).await
    }

    async fn channel_document(&self, path: &str) -> StorageResult<serde_json::Value> {
        self.read_json(path).await
    }
}
