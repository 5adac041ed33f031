//! Wavematch Daemon library
//!
//! This module provides the core components for the wavematch daemon:
//! - REST API and scan event stream
//! - Channel storage backends
//! - Background scan execution
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod scan;
pub mod server;
pub mod storage;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError, StorageError};
pub use scan::{ScanAck, ScanRequest, ScanService};
pub use server::Server;
pub use storage::{ChannelStore, FileChannelStore, InMemoryChannelStore};
