//! One-shot capture of the region.

use std::path::PathBuf;

use anyhow::Context;

use regioncast_capture_engine::{extract_region, ScreenSource};
use regioncast_common::config::AppConfig;
use regioncast_region_model::{OverlayMode, ScreenBounds};
use regioncast_render_engine::{OverlayContext, OverlayRenderer};
use regioncast_viewer::write_snapshot;

pub fn run(
    app: &AppConfig,
    config: Option<PathBuf>,
    monitor: Option<usize>,
    overlay: Option<u8>,
    synthetic: Option<(u32, u32)>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mode = match overlay {
        Some(rank) => OverlayMode::from_rank(rank)
            .ok_or_else(|| anyhow::anyhow!("Overlay mode must be 0-4, got {rank}"))?,
        None => OverlayMode::None,
    };

    let stream = super::load_stream_config(app, config);
    let mut source = super::screen_source(monitor.or(app.capture.monitor_index), synthetic);
    let full = source.grab()?;

    let region = stream.region();
    let mut frame = extract_region(&full, &region)?;
    if mode != OverlayMode::None {
        let ctx = OverlayContext {
            region,
            speed: stream.movement_mode,
            screen: Some(ScreenBounds {
                width: full.width(),
                height: full.height(),
            }),
        };
        frame = OverlayRenderer::default().render(&frame, mode, &ctx);
    }

    let path = match output {
        Some(path) => {
            frame
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path
        }
        None => write_snapshot(&frame, &app.viewer.snapshot_dir, &chrono::Local::now())?,
    };

    println!("Captured {region} from {}", source.name());
    println!("Saved: {}", path.display());
    Ok(())
}
