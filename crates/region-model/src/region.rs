//! Capture region geometry.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Largest width or height a region may take. Keeps every extracted frame
/// well inside what the capture thread can allocate.
pub const MAX_REGION_SIZE: i32 = 16_384;

/// The rectangle of the full display that is extracted each cycle.
///
/// Any values are representable: a region hanging off the screen, or with
/// a negative origin, is a supported edge-capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CaptureRegion {
    /// Home position used on first start and by reset.
    pub const DEFAULT: CaptureRegion = CaptureRegion {
        x: 40,
        y: 330,
        width: 340,
        height: 230,
    };

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Both dimensions are in `1..=MAX_REGION_SIZE`.
    pub fn has_valid_size(&self) -> bool {
        let valid = 1..=MAX_REGION_SIZE;
        valid.contains(&self.width) && valid.contains(&self.height)
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Whether the region touches or crosses any screen edge.
    ///
    /// With unknown screen bounds only the top/left edges can be judged.
    pub fn touches_edge(&self, screen: Option<ScreenBounds>) -> bool {
        if self.x <= 0 || self.y <= 0 {
            return true;
        }
        match screen {
            Some(screen) => {
                self.right() >= screen.width as i64 || self.bottom() >= screen.height as i64
            }
            None => false,
        }
    }

    /// Overlap with a `width` x `height` surface anchored at the origin.
    ///
    /// Returns `(x0, y0, x1, y1)` in surface coordinates, or `None` when the
    /// region and surface do not overlap.
    pub fn intersect(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (self.x as i64).max(0);
        let y0 = (self.y as i64).max(0);
        let x1 = self.right().min(width as i64);
        let y1 = self.bottom().min(height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Default for CaptureRegion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for CaptureRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Size of the full screen frame the region is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub width: u32,
    pub height: u32,
}

/// Handle to the live capture region.
///
/// The orchestrator is the only writer; the capture thread reads a copy
/// every cycle. The lock only keeps the four fields consistent with each
/// other, it is never held across a capture.
#[derive(Debug, Clone, Default)]
pub struct SharedRegion {
    inner: Arc<RwLock<CaptureRegion>>,
}

impl SharedRegion {
    pub fn new(region: CaptureRegion) -> Self {
        Self {
            inner: Arc::new(RwLock::new(region)),
        }
    }

    /// Current region value.
    pub fn get(&self) -> CaptureRegion {
        *self.inner.read()
    }

    /// Replace the region.
    pub fn set(&self, region: CaptureRegion) {
        *self.inner.write() = region;
    }

    /// Apply an in-place edit and return the new value.
    pub fn update(&self, f: impl FnOnce(&mut CaptureRegion)) -> CaptureRegion {
        let mut guard = self.inner.write();
        f(&mut guard);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenBounds = ScreenBounds {
        width: 1920,
        height: 1080,
    };

    #[test]
    fn default_region_is_home_position() {
        assert_eq!(CaptureRegion::default(), CaptureRegion::new(40, 330, 340, 230));
    }

    #[test]
    fn interior_region_does_not_touch_edge() {
        assert!(!CaptureRegion::DEFAULT.touches_edge(Some(SCREEN)));
    }

    #[test]
    fn edge_detection_covers_all_sides() {
        assert!(CaptureRegion::new(0, 100, 50, 50).touches_edge(Some(SCREEN)));
        assert!(CaptureRegion::new(100, -4, 50, 50).touches_edge(Some(SCREEN)));
        assert!(CaptureRegion::new(1870, 100, 50, 50).touches_edge(Some(SCREEN)));
        assert!(CaptureRegion::new(100, 1030, 50, 50).touches_edge(Some(SCREEN)));
        assert!(!CaptureRegion::new(1869, 1029, 50, 50).touches_edge(Some(SCREEN)));
    }

    #[test]
    fn unknown_screen_only_judges_origin() {
        assert!(!CaptureRegion::new(5000, 5000, 50, 50).touches_edge(None));
        assert!(CaptureRegion::new(0, 5000, 50, 50).touches_edge(None));
    }

    #[test]
    fn intersect_clips_negative_origin() {
        let region = CaptureRegion::new(-10, -20, 100, 100);
        assert_eq!(region.intersect(50, 60), Some((0, 0, 50, 60)));
        assert_eq!(region.intersect(200, 200), Some((0, 0, 90, 80)));
    }

    #[test]
    fn intersect_misses_offscreen_region() {
        assert_eq!(CaptureRegion::new(300, 0, 10, 10).intersect(200, 200), None);
        assert_eq!(CaptureRegion::new(-30, 0, 30, 10).intersect(200, 200), None);
        assert_eq!(CaptureRegion::new(0, 0, 0, 10).intersect(200, 200), None);
    }

    #[test]
    fn size_validity_has_floor_and_ceiling() {
        assert!(CaptureRegion::DEFAULT.has_valid_size());
        assert!(CaptureRegion::new(-500, -500, 1, MAX_REGION_SIZE).has_valid_size());
        assert!(!CaptureRegion::new(0, 0, 0, 10).has_valid_size());
        assert!(!CaptureRegion::new(0, 0, 10, -1).has_valid_size());
        assert!(!CaptureRegion::new(0, 0, MAX_REGION_SIZE + 1, 10).has_valid_size());
        assert!(!CaptureRegion::new(0, 0, i32::MAX, i32::MAX).has_valid_size());
    }

    #[test]
    fn shared_region_updates_are_visible_to_clones() {
        let shared = SharedRegion::new(CaptureRegion::DEFAULT);
        let reader = shared.clone();
        let updated = shared.update(|r| r.x += 5);
        assert_eq!(updated.x, 45);
        assert_eq!(reader.get().x, 45);
    }
}
