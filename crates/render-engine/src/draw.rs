//! Clipped drawing primitives over RGB frames.

use image::Rgb;
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use regioncast_region_model::Frame;

/// Fill a rectangle, clipped to the frame. Empty rectangles draw nothing.
pub fn fill_rect(img: &mut Frame, x: i32, y: i32, width: i32, height: i32, color: Rgb<u8>) {
    if width <= 0 || height <= 0 {
        return;
    }
    draw_filled_rect_mut(
        img,
        Rect::at(x, y).of_size(width as u32, height as u32),
        color,
    );
}

/// Outline the frame perimeter with a band `thickness` pixels wide.
pub fn stroke_border(img: &mut Frame, thickness: i32, color: Rgb<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    fill_rect(img, 0, 0, w, thickness, color);
    fill_rect(img, 0, h - thickness, w, thickness, color);
    fill_rect(img, 0, 0, thickness, h, color);
    fill_rect(img, w - thickness, 0, thickness, h, color);
}

/// L-shaped brackets in the four corners, arms `length` long.
pub fn corner_brackets(img: &mut Frame, length: i32, thickness: i32, color: Rgb<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let len_x = length.min(w);
    let len_y = length.min(h);

    for (left, top) in [(true, true), (false, true), (true, false), (false, false)] {
        let x = if left { 0 } else { w - len_x };
        let y = if top { 0 } else { h - thickness };
        fill_rect(img, x, y, len_x, thickness, color);

        let x = if left { 0 } else { w - thickness };
        let y = if top { 0 } else { h - len_y };
        fill_rect(img, x, y, thickness, len_y, color);
    }
}

/// Blend `color` over a rectangle with weight `alpha` (0.0 keeps the frame).
pub fn blend_rect(
    img: &mut Frame,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    color: Rgb<u8>,
    alpha: f32,
) {
    let alpha = alpha.clamp(0.0, 1.0);
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + width).min(img.width() as i32);
    let y1 = (y + height).min(img.height() as i32);

    for py in y0..y1 {
        for px in x0..x1 {
            let pixel = img.get_pixel_mut(px as u32, py as u32);
            for (channel, over) in pixel.0.iter_mut().zip(color.0) {
                let mixed = *channel as f32 * (1.0 - alpha) + over as f32 * alpha;
                *channel = mixed.round() as u8;
            }
        }
    }
}

/// Horizontal and vertical strokes through `(cx, cy)` plus a filled dot.
pub fn crosshair(img: &mut Frame, cx: i32, cy: i32, arm: i32, dot_radius: i32, color: Rgb<u8>) {
    fill_rect(img, cx - arm, cy, arm * 2 + 1, 1, color);
    fill_rect(img, cx, cy - arm, 1, arm * 2 + 1, color);
    draw_filled_circle_mut(img, (cx, cy), dot_radius, color);
}
