//! Frame buffer type.

use image::{Rgb, RgbImage};

use crate::region::MAX_REGION_SIZE;

/// An 8-bit RGB pixel buffer. Extracted and annotated frames use this type.
pub type Frame = RgbImage;

/// Black, the padding color for pixels outside the screen.
pub const PAD_PIXEL: Rgb<u8> = Rgb([0, 0, 0]);

/// A black frame of the given size. Non-positive sizes give an empty axis and
/// each axis is capped at [`MAX_REGION_SIZE`].
pub fn blank_frame(width: i32, height: i32) -> Frame {
    let clamp = |v: i32| v.clamp(0, MAX_REGION_SIZE) as u32;
    Frame::from_pixel(clamp(width), clamp(height), PAD_PIXEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_frame_clamps_negative_sizes() {
        let frame = blank_frame(-5, 3);
        assert_eq!(frame.dimensions(), (0, 3));
    }

    #[test]
    fn blank_frame_caps_huge_sizes() {
        let frame = blank_frame(i32::MAX, 2);
        assert_eq!(frame.dimensions(), (MAX_REGION_SIZE as u32, 2));
    }
}
