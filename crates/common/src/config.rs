//! Application configuration.
//!
//! This is the tool-level configuration (frame rate, paths, logging). The
//! per-region stream settings the operator edits live in
//! `regioncast_region_model::StreamConfig` and have their own file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Capture loop settings.
    pub capture: CaptureDefaults,

    /// Interactive viewer settings.
    pub viewer: ViewerDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Capture loop parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureDefaults {
    /// Target sampling rate of the capture loop.
    pub fps: u32,

    /// Slots in the frame hand-off buffer.
    pub buffer_capacity: usize,

    /// Pause after a failed grab.
    pub error_backoff_ms: u64,

    /// How long `stop()` waits for the capture thread.
    pub stop_timeout_ms: u64,

    /// Monitor to grab; `None` picks the primary monitor.
    pub monitor_index: Option<usize>,
}

/// Interactive viewer parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerDefaults {
    /// Where the stream region record is persisted.
    pub stream_config_file: PathBuf,

    /// Directory snapshots are written to.
    pub snapshot_dir: PathBuf,

    /// Sleep when no frame is ready.
    pub idle_backoff_ms: u64,

    /// Persist the stream config on exit.
    pub auto_save: bool,

    /// Minimum time between preview image writes.
    pub preview_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "regioncast=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            fps: 30,
            buffer_capacity: 30,
            error_backoff_ms: 100,
            stop_timeout_ms: 2000,
            monitor_index: None,
        }
    }
}

impl CaptureDefaults {
    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(self.error_backoff_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

impl Default for ViewerDefaults {
    fn default() -> Self {
        Self {
            stream_config_file: PathBuf::from("stream_config.json"),
            snapshot_dir: PathBuf::from("."),
            idle_backoff_ms: 10,
            auto_save: true,
            preview_interval_ms: 250,
        }
    }
}

impl ViewerDefaults {
    pub fn idle_backoff(&self) -> Duration {
        Duration::from_millis(self.idle_backoff_ms)
    }

    pub fn preview_interval(&self) -> Duration {
        Duration::from_millis(self.preview_interval_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("regioncast").join("config.json")
}
