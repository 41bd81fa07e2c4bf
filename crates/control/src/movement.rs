//! Region movement and resizing.

use tracing::debug;

use regioncast_region_model::{CaptureRegion, StreamConfig, MAX_REGION_SIZE};

/// Smallest width or height a resize may produce.
pub const MIN_REGION_SIZE: i32 = 50;

/// Pixels added or removed per grow/shrink step on each axis.
pub const RESIZE_STEP: i32 = 10;

/// Applies operator edits to a [`StreamConfig`].
///
/// Moves are scaled by the active speed tier and are never clamped: a region
/// may sit partly or fully off screen. Resizes are in raw pixels and held
/// between `min_size` and [`MAX_REGION_SIZE`] per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementController {
    /// Floor for width and height.
    pub min_size: i32,

    /// Region restored by [`reset`](Self::reset).
    pub home: CaptureRegion,

    /// Grow/shrink increment.
    pub resize_step: i32,
}

impl Default for MovementController {
    fn default() -> Self {
        Self {
            min_size: MIN_REGION_SIZE,
            home: CaptureRegion::DEFAULT,
            resize_step: RESIZE_STEP,
        }
    }
}

impl MovementController {
    /// Shift the region by `steps` scaled with the current speed tier.
    pub fn move_by(&self, config: &StreamConfig, dx_steps: i32, dy_steps: i32) -> CaptureRegion {
        let factor = config.movement_mode.multiplier();
        let region = config.region.update(|region| {
            region.x = region.x.saturating_add(dx_steps.saturating_mul(factor));
            region.y = region.y.saturating_add(dy_steps.saturating_mul(factor));
        });
        debug!(region = %region, tier = %config.movement_mode, "Region moved");
        region
    }

    /// Change width and height by raw pixel deltas, keeping each axis
    /// between `min_size` and [`MAX_REGION_SIZE`].
    pub fn resize_by(&self, config: &StreamConfig, dw: i32, dh: i32) -> CaptureRegion {
        let floor = self.min_size.min(MAX_REGION_SIZE);
        let region = config.region.update(|region| {
            region.width = region.width.saturating_add(dw).clamp(floor, MAX_REGION_SIZE);
            region.height = region.height.saturating_add(dh).clamp(floor, MAX_REGION_SIZE);
        });
        debug!(region = %region, "Region resized");
        region
    }

    pub fn grow(&self, config: &StreamConfig) -> CaptureRegion {
        self.resize_by(config, self.resize_step, self.resize_step)
    }

    pub fn shrink(&self, config: &StreamConfig) -> CaptureRegion {
        self.resize_by(config, -self.resize_step, -self.resize_step)
    }

    /// Restore the home region. Overlay mode and speed are kept.
    pub fn reset(&self, config: &StreamConfig) -> CaptureRegion {
        config.set_region(self.home);
        debug!(region = %self.home, "Region reset");
        self.home
    }

    /// Advance to the next speed tier, wrapping after Turbo.
    pub fn cycle_speed(&self, config: &mut StreamConfig) {
        config.movement_mode = config.movement_mode.next();
        debug!(tier = %config.movement_mode, "Speed tier changed");
    }

    /// Place the region at absolute coordinates.
    ///
    /// Returns false and leaves the region alone unless both dimensions are
    /// positive and within [`MAX_REGION_SIZE`].
    pub fn set_region(&self, config: &StreamConfig, region: CaptureRegion) -> bool {
        if !region.has_valid_size() {
            debug!(region = %region, "Rejected calibration with unusable size");
            return false;
        }
        config.set_region(region);
        debug!(region = %region, "Region calibrated");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use regioncast_region_model::MovementSpeedTier;

    fn config_at(region: CaptureRegion) -> StreamConfig {
        let config = StreamConfig::default();
        config.set_region(region);
        config
    }

    #[test]
    fn test_move_scales_with_tier() {
        let controller = MovementController::default();
        let mut config = StreamConfig::default();

        controller.move_by(&config, 1, 0);
        assert_eq!(config.region().x, 45);

        config.movement_mode = MovementSpeedTier::Fast;
        controller.move_by(&config, 0, -2);
        assert_eq!(config.region().y, 310);
    }

    #[test]
    fn test_turbo_moves_twenty_times_fine() {
        let controller = MovementController::default();

        let mut fine = StreamConfig::default();
        fine.movement_mode = MovementSpeedTier::Fine;
        let mut turbo = StreamConfig::default();
        turbo.movement_mode = MovementSpeedTier::Turbo;

        let start = CaptureRegion::DEFAULT;
        let fine_dx = controller.move_by(&fine, 3, 0).x - start.x;
        let turbo_dx = controller.move_by(&turbo, 3, 0).x - start.x;
        assert_eq!(turbo_dx, fine_dx * 20);
    }

    #[test]
    fn test_moves_are_not_clamped() {
        let controller = MovementController::default();
        let config = config_at(CaptureRegion::new(0, 0, 100, 100));
        controller.move_by(&config, -3, -3);
        assert_eq!(config.region(), CaptureRegion::new(-15, -15, 100, 100));
    }

    #[test]
    fn test_grow_then_shrink_clamps_each_axis() {
        let controller = MovementController::default();
        let config = StreamConfig::default();

        for _ in 0..3 {
            controller.grow(&config);
        }
        assert_eq!(config.region(), CaptureRegion::new(40, 330, 370, 260));

        for _ in 0..40 {
            controller.shrink(&config);
        }
        let region = config.region();
        assert_eq!((region.width, region.height), (50, 50));
        assert_eq!((region.x, region.y), (40, 330));
    }

    #[test]
    fn test_resize_floors_axes_independently() {
        let controller = MovementController::default();
        let config = config_at(CaptureRegion::new(0, 0, 60, 300));
        controller.resize_by(&config, -30, -30);
        assert_eq!(config.region(), CaptureRegion::new(0, 0, 50, 270));
    }

    #[test]
    fn test_resize_caps_at_ceiling() {
        let controller = MovementController::default();
        let config = config_at(CaptureRegion::new(0, 0, MAX_REGION_SIZE - 5, 100));
        controller.grow(&config);
        controller.resize_by(&config, i32::MAX, 0);
        let region = config.region();
        assert_eq!((region.width, region.height), (MAX_REGION_SIZE, 110));
    }

    #[test]
    fn test_reset_keeps_modes() {
        let controller = MovementController::default();
        let mut config = config_at(CaptureRegion::new(900, 10, 55, 55));
        config.movement_mode = MovementSpeedTier::Turbo;

        controller.reset(&config);
        assert_eq!(config.region(), CaptureRegion::DEFAULT);
        assert_eq!(config.movement_mode, MovementSpeedTier::Turbo);
    }

    #[test]
    fn test_cycle_speed_wraps() {
        let controller = MovementController::default();
        let mut config = StreamConfig::default();
        let seen: Vec<_> = (0..4)
            .map(|_| {
                controller.cycle_speed(&mut config);
                config.movement_mode
            })
            .collect();
        assert_eq!(
            seen,
            vec![
                MovementSpeedTier::Fast,
                MovementSpeedTier::Turbo,
                MovementSpeedTier::Fine,
                MovementSpeedTier::Normal,
            ]
        );
    }

    #[test]
    fn test_set_region_rejects_empty_sizes() {
        let controller = MovementController::default();
        let config = StreamConfig::default();

        assert!(!controller.set_region(&config, CaptureRegion::new(0, 0, 0, 100)));
        assert!(!controller.set_region(&config, CaptureRegion::new(0, 0, 100, -1)));
        assert_eq!(config.region(), CaptureRegion::DEFAULT);

        assert!(!controller.set_region(&config, CaptureRegion::new(0, 0, i32::MAX, i32::MAX)));
        assert!(!controller.set_region(&config, CaptureRegion::new(0, 0, MAX_REGION_SIZE + 1, 10)));
        assert_eq!(config.region(), CaptureRegion::DEFAULT);

        assert!(controller.set_region(&config, CaptureRegion::new(-50, 2000, 10, 10)));
        assert_eq!(config.region(), CaptureRegion::new(-50, 2000, 10, 10));
    }

    proptest! {
        #[test]
        fn prop_resize_never_below_floor(
            w in 1i32..2000,
            h in 1i32..2000,
            dw in -3000i32..3000,
            dh in -3000i32..3000,
        ) {
            let controller = MovementController::default();
            let config = config_at(CaptureRegion::new(0, 0, w, h));
            let region = controller.resize_by(&config, dw, dh);
            prop_assert!(region.width >= MIN_REGION_SIZE);
            prop_assert!(region.height >= MIN_REGION_SIZE);
            prop_assert!(region.has_valid_size());
        }

        #[test]
        fn prop_move_preserves_size(dx in -100i32..100, dy in -100i32..100) {
            let controller = MovementController::default();
            let config = StreamConfig::default();
            let region = controller.move_by(&config, dx, dy);
            prop_assert_eq!(region.width, CaptureRegion::DEFAULT.width);
            prop_assert_eq!(region.height, CaptureRegion::DEFAULT.height);
            prop_assert_eq!(region.x, CaptureRegion::DEFAULT.x + dx * 5);
        }
    }
}
