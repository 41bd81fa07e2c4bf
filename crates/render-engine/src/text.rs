//! 8x8 bitmap text.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::Rgb;

use regioncast_region_model::Frame;

/// Glyph cell size in pixels.
pub const GLYPH_SIZE: i32 = 8;

/// Pixel width of `text` when drawn.
pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_SIZE
}

/// Draw `text` with its top-left corner at `(x, y)`. Pixels outside the
/// frame are skipped; characters without a glyph render as `?`.
pub fn draw_text(img: &mut Frame, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let mut cursor_x = x;

    for ch in text.chars() {
        let glyph = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?'));
        if let Some(glyph) = glyph {
            for (row_idx, &row_bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if (row_bits >> col) & 1 == 0 {
                        continue;
                    }
                    let px = cursor_x + col;
                    let py = y + row_idx as i32;
                    if px >= 0 && py >= 0 && px < w && py < h {
                        img.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
        cursor_x += GLYPH_SIZE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb<u8> = Rgb([0, 0, 0]);
    const INK: Rgb<u8> = Rgb([0, 255, 0]);

    fn inked(img: &Frame) -> usize {
        img.pixels().filter(|p| **p == INK).count()
    }

    #[test]
    fn test_text_marks_pixels_inside_cells() {
        let mut img = Frame::from_pixel(40, 10, BG);
        draw_text(&mut img, 1, 1, "Hi", INK);
        assert!(inked(&img) > 0);
        for (x, y, p) in img.enumerate_pixels() {
            if *p == INK {
                assert!((1..17).contains(&x) && (1..9).contains(&y));
            }
        }
    }

    #[test]
    fn test_spaces_draw_nothing() {
        let mut img = Frame::from_pixel(40, 10, BG);
        draw_text(&mut img, 0, 0, "   ", INK);
        assert_eq!(inked(&img), 0);
    }

    #[test]
    fn test_text_clips_at_frame_edge() {
        let mut img = Frame::from_pixel(12, 6, BG);
        draw_text(&mut img, 6, 2, "WWW", INK);
        draw_text(&mut img, -20, -3, "WWW", INK);
        assert_eq!(img.dimensions(), (12, 6));
    }

    #[test]
    fn test_width_counts_chars() {
        assert_eq!(text_width("DEBUG MODE"), 80);
    }
}
