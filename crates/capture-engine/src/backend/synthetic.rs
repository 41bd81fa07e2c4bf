//! Synthetic screen for headless runs and tests.

use image::Rgb;
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use regioncast_common::error::{RegioncastError, RegioncastResult};
use regioncast_region_model::Frame;

use super::ScreenSource;

const BACKGROUND: Rgb<u8> = Rgb([30, 30, 35]);
const GRID_LINE: Rgb<u8> = Rgb([80, 80, 90]);
const QUADRANT_MARKER: Rgb<u8> = Rgb([200, 150, 50]);
const SWEEP_BAR: Rgb<u8> = Rgb([50, 200, 255]);
const GRID_SPACING: u32 = 100;

/// Generates a grid test pattern with a bar that sweeps one column per frame.
///
/// Optionally fails every `n`th grab to exercise the capture loop's
/// recovery path.
pub struct SyntheticSource {
    base: Frame,
    frame_index: u64,
    fail_every: Option<u64>,
    name: String,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            base: grid_pattern(width, height),
            frame_index: 0,
            fail_every: None,
            name: format!("synthetic:{width}x{height}"),
        }
    }

    /// Make every `n`th grab fail. Zero disables failures.
    pub fn with_failure_every(mut self, n: u64) -> Self {
        self.fail_every = (n > 0).then_some(n);
        self
    }

    /// Grabs attempted so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl ScreenSource for SyntheticSource {
    fn grab(&mut self) -> RegioncastResult<Frame> {
        self.frame_index += 1;
        if let Some(n) = self.fail_every {
            if self.frame_index % n == 0 {
                return Err(RegioncastError::capture(format!(
                    "synthetic failure on grab {}",
                    self.frame_index
                )));
            }
        }

        let mut frame = self.base.clone();
        if frame.width() > 0 && frame.height() > 0 {
            let column = (self.frame_index % frame.width() as u64) as i32;
            let height = frame.height();
            draw_filled_rect_mut(
                &mut frame,
                Rect::at(column, 0).of_size(4, height),
                SWEEP_BAR,
            );
        }
        Ok(frame)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Grid pattern with quadrant markers for spatial checks.
pub fn grid_pattern(width: u32, height: u32) -> Frame {
    let mut img = Frame::from_pixel(width, height, BACKGROUND);

    for x in (0..width).step_by(GRID_SPACING as usize) {
        for y in 0..height {
            img.put_pixel(x, y, GRID_LINE);
        }
    }
    for y in (0..height).step_by(GRID_SPACING as usize) {
        for x in 0..width {
            img.put_pixel(x, y, GRID_LINE);
        }
    }

    let quadrants = [
        (width / 4, height / 4),
        (3 * width / 4, height / 4),
        (3 * width / 4, 3 * height / 4),
        (width / 4, 3 * height / 4),
    ];
    for (x, y) in &quadrants {
        draw_filled_circle_mut(&mut img, (*x as i32, *y as i32), 8i32, QUADRANT_MARKER);
    }

    img
}
