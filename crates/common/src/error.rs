//! Error types shared across Regioncast crates.

use std::path::PathBuf;

/// Top-level error type for Regioncast operations.
#[derive(Debug, thiserror::Error)]
pub enum RegioncastError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Snapshot error at {path}: {message}")]
    Snapshot { path: PathBuf, message: String },

    #[error("Invalid command: {message}")]
    InvalidCommand { message: String },

    /// The capture worker did not exit within the allowed wait.
    #[error("Capture loop did not stop within {waited_ms}ms")]
    ShutdownTimeout { waited_ms: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using RegioncastError.
pub type RegioncastResult<T> = Result<T, RegioncastError>;

impl RegioncastError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn snapshot(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Snapshot {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn invalid_command(msg: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: msg.into(),
        }
    }

    /// Whether this error means a producer thread is stuck.
    pub fn is_shutdown_timeout(&self) -> bool {
        matches!(self, Self::ShutdownTimeout { .. })
    }
}
