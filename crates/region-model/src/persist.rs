//! Stream config persistence.
//!
//! The record is a small JSON object:
//!
//! ```json
//! { "x": 40, "y": 330, "width": 340, "height": 230, "overlay_mode": 2, "movement_mode": 5 }
//! ```
//!
//! Loading never fails hard. A missing, corrupt or out-of-range record leaves
//! the current settings in place so the viewer can always start.

use serde::{Deserialize, Serialize};

use regioncast_common::error::{RegioncastError, RegioncastResult};

use crate::modes::{MovementSpeedTier, OverlayMode};
use crate::region::MAX_REGION_SIZE;
use crate::stream::StreamConfig;

/// On-disk form of the stream settings. Every field is optional on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    /// Overlay rank, 0 through 4.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_mode: Option<i64>,
    /// Speed multiplier: 1, 5, 10 or 20.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_mode: Option<i64>,
}

/// Outcome of [`load_stream_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// A record was read and its fields applied.
    Applied,
    /// No usable record; the config was left unchanged.
    NotFound,
}

impl StreamRecord {
    /// Record holding every persisted field of `config`.
    pub fn capture(config: &StreamConfig) -> Self {
        let region = config.region();
        Self {
            x: Some(region.x),
            y: Some(region.y),
            width: Some(region.width),
            height: Some(region.height),
            overlay_mode: Some(config.overlay_mode.rank() as i64),
            movement_mode: Some(config.movement_mode.multiplier() as i64),
        }
    }

    /// Check every present field against its domain.
    ///
    /// Sizes must lie in `1..=MAX_REGION_SIZE`, `overlay_mode` in 0-4 and
    /// `movement_mode` in {1, 5, 10, 20}.
    pub fn validate(&self) -> RegioncastResult<()> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if let Some(size) = value {
                if !(1..=MAX_REGION_SIZE).contains(&size) {
                    return Err(RegioncastError::config(format!(
                        "{field} {size} outside 1..={MAX_REGION_SIZE}"
                    )));
                }
            }
        }
        if let Some(rank) = self.overlay_mode {
            if overlay_from_ordinal(rank).is_none() {
                return Err(RegioncastError::config(format!("unknown overlay_mode {rank}")));
            }
        }
        if let Some(multiplier) = self.movement_mode {
            if MovementSpeedTier::from_multiplier(multiplier).is_none() {
                return Err(RegioncastError::config(format!(
                    "unknown movement_mode {multiplier}"
                )));
            }
        }
        Ok(())
    }

    /// Overwrite the fields of `config` present in this record.
    ///
    /// An invalid record is rejected as a whole and `config` is left as is.
    pub fn apply_to(&self, config: &mut StreamConfig) -> RegioncastResult<()> {
        self.validate()?;

        config.region.update(|region| {
            if let Some(x) = self.x {
                region.x = x;
            }
            if let Some(y) = self.y {
                region.y = y;
            }
            if let Some(width) = self.width {
                region.width = width;
            }
            if let Some(height) = self.height {
                region.height = height;
            }
        });
        if let Some(mode) = self.overlay_mode.and_then(overlay_from_ordinal) {
            config.overlay_mode = mode;
        }
        if let Some(tier) = self.movement_mode.and_then(MovementSpeedTier::from_multiplier) {
            config.movement_mode = tier;
        }
        Ok(())
    }
}

fn overlay_from_ordinal(rank: i64) -> Option<OverlayMode> {
    u8::try_from(rank).ok().and_then(OverlayMode::from_rank)
}

/// Write the stream settings to `config.config_file`, replacing any
/// existing record.
pub fn save_stream_config(config: &StreamConfig) -> RegioncastResult<()> {
    let path = &config.config_file;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(&StreamRecord::capture(config))?;
    std::fs::write(path, json).map_err(|e| {
        RegioncastError::config(format!("Failed to write {}: {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), region = %config.region(), "Stream config saved");
    Ok(())
}

/// Read `config.config_file` and apply it to `config`.
///
/// Missing, unreadable and malformed files all report `NotFound` and leave
/// `config` untouched.
pub fn load_stream_config(config: &mut StreamConfig) -> LoadStatus {
    let path = config.config_file.clone();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No saved stream config");
        return LoadStatus::NotFound;
    }

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read stream config at {:?}: {}", path, e);
            return LoadStatus::NotFound;
        }
    };

    let record: StreamRecord = match serde_json::from_str(&content) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("Failed to parse stream config at {:?}: {}", path, e);
            return LoadStatus::NotFound;
        }
    };

    if let Err(e) = record.apply_to(config) {
        tracing::warn!("Rejected stream config at {:?}: {}", path, e);
        return LoadStatus::NotFound;
    }
    tracing::info!(path = %path.display(), region = %config.region(), "Loaded saved stream config");
    LoadStatus::Applied
}

/// Persistence handle owned by the viewer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn save(&self, config: &StreamConfig) -> RegioncastResult<()> {
        save_stream_config(config)
    }

    pub fn load(&self, config: &mut StreamConfig) -> LoadStatus {
        load_stream_config(config)
    }
}
