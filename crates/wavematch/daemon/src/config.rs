//! Configuration for wavematch-daemon

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use wavematch_types::MatchingParams;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Channel storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Matching parameters applied to every scan
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    /// Capacity of the scan event broadcast channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            enable_cors: true,
            max_body_size: default_max_body_size(),
            event_buffer: default_event_buffer(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Channel files and the struct tree read from a data directory
    File {
        /// Root of every channel path
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,

        /// Struct tree document, relative to `data_dir`
        #[serde(default = "default_struct_tree_file")]
        struct_tree_file: String,
    },

    /// In-memory storage (for development/testing)
    Memory,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File {
            data_dir: default_data_dir(),
            struct_tree_file: default_struct_tree_file(),
        }
    }
}

/// Matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum correlation for a window to count as a match
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Smallest window size tried
    #[serde(default = "default_min_window_size")]
    pub min_window_size: usize,

    /// Slide step is the reference length divided by this
    #[serde(default = "default_step_divisor")]
    pub step_divisor: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let params = MatchingParams::default();
        Self {
            threshold: params.threshold,
            min_window_size: params.min_window_size,
            step_divisor: params.step_divisor,
        }
    }
}

impl From<&MatchingConfig> for MatchingParams {
    fn from(config: &MatchingConfig) -> Self {
        MatchingParams {
            threshold: config.threshold,
            min_window_size: config.min_window_size,
            step_divisor: config.step_divisor,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024
}

fn default_event_buffer() -> usize {
    1000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_struct_tree_file() -> String {
    "Data/StructTree.json".to_string()
}

fn default_threshold() -> f64 {
    MatchingParams::default().threshold
}

fn default_min_window_size() -> usize {
    MatchingParams::default().min_window_size
}

fn default_step_divisor() -> usize {
    MatchingParams::default().step_divisor
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration from defaults, an optional file, and the environment
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // WAVEMATCH_SERVER__LISTEN_ADDR -> server.listen_addr
        builder = builder.add_source(
            config::Environment::with_prefix("WAVEMATCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Matching parameters for the engine
    pub fn matching_params(&self) -> MatchingParams {
        MatchingParams::from(&self.matching)
    }

    /// Point file storage at another data directory.
    ///
    /// Switches a memory-backed configuration to file storage.
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        match &mut self.storage {
            StorageConfig::File { data_dir, .. } => *data_dir = dir,
            StorageConfig::Memory => {
                self.storage = StorageConfig::File {
                    data_dir: dir,
                    struct_tree_file: default_struct_tree_file(),
                }
            }
        }
    }
}
