//! Overlay verbosity and movement speed tiers.

use serde::{Deserialize, Serialize};

/// Cumulative overlay verbosity.
///
/// Each mode draws everything the previous rank draws plus one layer, so
/// renderers compare ranks instead of matching variants.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OverlayMode {
    None = 0,
    Minimal = 1,
    #[default]
    Standard = 2,
    Full = 3,
    Debug = 4,
}

impl OverlayMode {
    pub const ALL: [OverlayMode; 5] = [
        OverlayMode::None,
        OverlayMode::Minimal,
        OverlayMode::Standard,
        OverlayMode::Full,
        OverlayMode::Debug,
    ];

    /// Numeric rank, also the persisted ordinal.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// True when this mode includes the layers of `other`.
    pub fn includes(self, other: OverlayMode) -> bool {
        self.rank() >= other.rank()
    }

    pub fn label(self) -> &'static str {
        match self {
            OverlayMode::None => "NONE",
            OverlayMode::Minimal => "MINIMAL",
            OverlayMode::Standard => "STANDARD",
            OverlayMode::Full => "FULL",
            OverlayMode::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pixel multiplier applied to movement steps.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MovementSpeedTier {
    Fine,
    #[default]
    Normal,
    Fast,
    Turbo,
}

impl MovementSpeedTier {
    pub const ALL: [MovementSpeedTier; 4] = [
        MovementSpeedTier::Fine,
        MovementSpeedTier::Normal,
        MovementSpeedTier::Fast,
        MovementSpeedTier::Turbo,
    ];

    /// Pixels moved per step; also the persisted value.
    pub fn multiplier(self) -> i32 {
        match self {
            MovementSpeedTier::Fine => 1,
            MovementSpeedTier::Normal => 5,
            MovementSpeedTier::Fast => 10,
            MovementSpeedTier::Turbo => 20,
        }
    }

    pub fn from_multiplier(value: i64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.multiplier() as i64 == value)
    }

    /// The following tier, wrapping from Turbo back to Fine.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            MovementSpeedTier::Fine => "FINE",
            MovementSpeedTier::Normal => "NORMAL",
            MovementSpeedTier::Fast => "FAST",
            MovementSpeedTier::Turbo => "TURBO",
        }
    }
}

impl std::fmt::Display for MovementSpeedTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
