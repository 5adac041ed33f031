//! Storage layer for wavematch-daemon
//!
//! Serves the struct tree and per-channel sample files.

mod file;
mod locator;
mod memory;
mod traits;

use crate::config::StorageConfig;
use std::sync::Arc;

pub use file::FileChannelStore;
pub use locator::stored_path;
pub use memory::InMemoryChannelStore;
pub use traits::{ChannelDocument, ChannelStore, StorageResult};

/// Build the store selected by the configuration
pub fn from_config(config: &StorageConfig) -> Arc<dyn ChannelStore> {
    match config {
        StorageConfig::File {
            data_dir,
            struct_tree_file,
        } => {
            tracing::info!(data_dir = %data_dir.display(), "Using file channel storage");
            Arc::new(FileChannelStore::new(data_dir.clone(), struct_tree_file.clone()))
        }
        StorageConfig::Memory => {
            tracing::info!("Using in-memory channel storage");
            Arc::new(InMemoryChannelStore::new())
        }
    }
}
