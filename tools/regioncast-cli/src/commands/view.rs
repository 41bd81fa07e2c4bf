//! Run the live viewer.

use std::path::PathBuf;

use regioncast_capture_engine::{CaptureSettings, ScreenSource};
use regioncast_common::config::AppConfig;
use regioncast_viewer::{Viewer, ViewerOptions};

use crate::console::ConsoleSink;

pub struct ViewArgs {
    pub config: Option<PathBuf>,
    pub monitor: Option<usize>,
    pub fps: Option<u32>,
    pub synthetic: Option<(u32, u32)>,
    pub auto_save: bool,
    pub preview: Option<PathBuf>,
    pub snapshot_dir: Option<PathBuf>,
}

pub fn run(app: &AppConfig, args: ViewArgs) -> anyhow::Result<()> {
    let mut config = super::load_stream_config(app, args.config);
    config.auto_save = config.auto_save && args.auto_save;

    let mut settings = CaptureSettings::from(&app.capture);
    if let Some(fps) = args.fps {
        settings.fps = fps;
    }

    let mut options = ViewerOptions::from(&app.viewer);
    if let Some(dir) = args.snapshot_dir {
        options.snapshot_dir = dir;
    }

    let source = super::screen_source(args.monitor.or(app.capture.monitor_index), args.synthetic);
    let sink = ConsoleSink::spawn(args.preview.clone(), app.viewer.preview_interval())?;

    println!("Regioncast viewer");
    println!("  Region: {}", config.region());
    println!("  Overlay: {}", config.overlay_mode);
    println!("  Speed: {}", config.movement_mode);
    println!("  Source: {}", source.name());
    if let Some(preview) = &args.preview {
        println!("  Preview: {}", preview.display());
    }
    println!();
    print_controls();

    let mut viewer = Viewer::new(config, source, settings, sink, options);
    let summary = viewer.run()?;

    println!();
    println!("Frames shown: {}", summary.frames_presented);
    println!("Commands: {}", summary.commands_handled);
    println!("Snapshots: {}", summary.snapshots_written);
    println!(
        "Captured: {} (dropped {}, {:.1}%; failed grabs {})",
        summary.capture.frames_captured,
        summary.capture.frames_dropped,
        summary.capture.drop_rate(),
        summary.capture.failed_grabs
    );
    println!("Final region: {}", summary.region);
    Ok(())
}

fn print_controls() {
    println!("Commands (one per line):");
    println!("  left|right|up|down [N]     Move the region N steps");
    println!("  grow | +, shrink | -       Resize by 10 px");
    println!("  overlay <0-4>              None, Minimal, Standard, Full, Debug");
    println!("  border                     Toggle border only");
    println!("  speed                      Cycle movement speed");
    println!("  calibrate <x> <y> <w> <h>  Place the region");
    println!("  reset                      Restore the default region");
    println!("  save                       Save the stream config");
    println!("  snap                       Write a snapshot");
    println!("  quit | q                   Exit");
    println!();
}
