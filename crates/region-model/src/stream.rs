//! Live stream settings edited by the operator.

use std::path::PathBuf;

use crate::modes::{MovementSpeedTier, OverlayMode};
use crate::region::{CaptureRegion, SharedRegion};

/// Default location of the persisted stream record.
pub const DEFAULT_STREAM_CONFIG_FILE: &str = "stream_config.json";

/// The single stream configuration of a viewer run.
///
/// Cloning shares the live region handle, so a clone handed to the capture
/// engine observes every move the orchestrator makes.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Region extracted from each full frame.
    pub region: SharedRegion,

    /// Overlay verbosity.
    pub overlay_mode: OverlayMode,

    /// Multiplier for movement steps.
    pub movement_mode: MovementSpeedTier,

    /// Persist on exit.
    pub auto_save: bool,

    /// Where the stream record lives.
    pub config_file: PathBuf,
}

impl StreamConfig {
    /// Defaults, persisted at `config_file`.
    pub fn with_file(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: config_file.into(),
            ..Self::default()
        }
    }

    /// Snapshot of the current region.
    pub fn region(&self) -> CaptureRegion {
        self.region.get()
    }

    pub fn set_region(&self, region: CaptureRegion) {
        self.region.set(region);
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            region: SharedRegion::new(CaptureRegion::DEFAULT),
            overlay_mode: OverlayMode::default(),
            movement_mode: MovementSpeedTier::default(),
            auto_save: true,
            config_file: PathBuf::from(DEFAULT_STREAM_CONFIG_FILE),
        }
    }
}
