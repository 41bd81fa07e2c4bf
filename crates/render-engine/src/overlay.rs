//! Layered overlay renderer.

use image::Rgb;
use tracing::trace;

use regioncast_region_model::{CaptureRegion, Frame, MovementSpeedTier, OverlayMode, ScreenBounds};

use crate::draw::{blend_rect, corner_brackets, crosshair, fill_rect, stroke_border};
use crate::text::{draw_text, text_width};

const BORDER_THICKNESS: i32 = 2;
const BRACKET_LENGTH: i32 = 20;
const BRACKET_THICKNESS: i32 = 3;

/// Info panel corners, inclusive.
const PANEL_TOP_LEFT: (i32, i32) = (5, 5);
const PANEL_BOTTOM_RIGHT: (i32, i32) = (250, 65);
const PANEL_ALPHA: f32 = 0.2;
const PANEL_TEXT_X: i32 = 10;
const PANEL_LINE_Y: [i32; 3] = [11, 29, 47];

const CROSSHAIR_ARM: i32 = 15;
const CENTER_DOT_RADIUS: i32 = 3;

const DEBUG_LABEL: &str = "DEBUG MODE";
const DEBUG_MARGIN: i32 = 10;

/// Colors used by the overlay layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub border_normal: Rgb<u8>,
    pub border_edge: Rgb<u8>,
    pub corner: Rgb<u8>,
    pub panel: Rgb<u8>,
    pub text: Rgb<u8>,
    pub grid: Rgb<u8>,
    pub crosshair: Rgb<u8>,
    pub debug: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            border_normal: Rgb([0, 255, 0]),
            border_edge: Rgb([255, 0, 0]),
            corner: Rgb([0, 255, 255]),
            panel: Rgb([0, 0, 0]),
            text: Rgb([0, 255, 0]),
            grid: Rgb([128, 128, 128]),
            crosshair: Rgb([255, 255, 0]),
            debug: Rgb([255, 0, 255]),
        }
    }
}

/// What the overlay reports about the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayContext {
    /// Region the frame was extracted from.
    pub region: CaptureRegion,

    /// Active movement speed tier.
    pub speed: MovementSpeedTier,

    /// Full screen size, if known.
    pub screen: Option<ScreenBounds>,
}

/// Draws positioning guides over extracted frames.
///
/// Layers are cumulative: each mode draws everything the lower ranks draw,
/// then one more layer on top.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    palette: Palette,
}

impl OverlayRenderer {
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render `mode`'s layers over a copy of `frame`.
    pub fn render(&self, frame: &Frame, mode: OverlayMode, ctx: &OverlayContext) -> Frame {
        trace!(mode = %mode, region = %ctx.region, "Rendering overlay");

        let mut out = frame.clone();
        if mode == OverlayMode::None || out.width() == 0 || out.height() == 0 {
            return out;
        }

        if mode.includes(OverlayMode::Minimal) {
            self.draw_border(&mut out, ctx);
        }
        if mode.includes(OverlayMode::Standard) {
            self.draw_info(&mut out, ctx);
        }
        if mode.includes(OverlayMode::Full) {
            self.draw_guides(&mut out);
        }
        if mode.includes(OverlayMode::Debug) {
            self.draw_debug(&mut out);
        }

        out
    }

    /// Border color for the current region.
    pub fn border_color(&self, ctx: &OverlayContext) -> Rgb<u8> {
        if ctx.region.touches_edge(ctx.screen) {
            self.palette.border_edge
        } else {
            self.palette.border_normal
        }
    }

    fn draw_border(&self, img: &mut Frame, ctx: &OverlayContext) {
        stroke_border(img, BORDER_THICKNESS, self.border_color(ctx));
        corner_brackets(img, BRACKET_LENGTH, BRACKET_THICKNESS, self.palette.corner);
    }

    fn draw_info(&self, img: &mut Frame, ctx: &OverlayContext) {
        let (x0, y0) = PANEL_TOP_LEFT;
        let (x1, y1) = PANEL_BOTTOM_RIGHT;
        blend_rect(
            img,
            x0,
            y0,
            x1 - x0 + 1,
            y1 - y0 + 1,
            self.palette.panel,
            PANEL_ALPHA,
        );

        let region = ctx.region;
        let lines = [
            format!("Pos: ({}, {})", region.x, region.y),
            format!("Size: {}x{}", region.width, region.height),
            format!("Mode: {}", ctx.speed.label()),
        ];
        for (line, y) in lines.iter().zip(PANEL_LINE_Y) {
            draw_text(img, PANEL_TEXT_X, y, line, self.palette.text);
        }
    }

    fn draw_guides(&self, img: &mut Frame) {
        let (w, h) = (img.width() as i32, img.height() as i32);

        for i in 1..3 {
            let x = w * i / 3;
            let y = h * i / 3;
            fill_rect(img, x, 0, 1, h, self.palette.grid);
            fill_rect(img, 0, y, w, 1, self.palette.grid);
        }

        crosshair(
            img,
            w / 2,
            h / 2,
            CROSSHAIR_ARM,
            CENTER_DOT_RADIUS,
            self.palette.crosshair,
        );
    }

    fn draw_debug(&self, img: &mut Frame) {
        let x = img.width() as i32 - text_width(DEBUG_LABEL) - DEBUG_MARGIN;
        draw_text(img, x, DEBUG_MARGIN, DEBUG_LABEL, self.palette.debug);
    }
}
