//! Show the effective configuration.

use std::path::PathBuf;

use regioncast_common::config::{config_file_path, AppConfig};
use regioncast_region_model::StreamRecord;

pub fn run(app: &AppConfig, config: Option<PathBuf>, init: bool) -> anyhow::Result<()> {
    let app_path = config_file_path();
    if init {
        if app_path.exists() {
            println!("Config already exists: {}", app_path.display());
        } else {
            app.save()?;
            println!("Wrote default config: {}", app_path.display());
        }
    }

    let stream = super::load_stream_config(app, config);

    println!("Application config: {}", app_path.display());
    println!("  Capture: {} fps, buffer {}", app.capture.fps, app.capture.buffer_capacity);
    println!("  Snapshots: {}", app.viewer.snapshot_dir.display());
    println!();

    println!("Stream config: {}", stream.config_file.display());
    println!("  Region: {}", stream.region());
    println!("  Overlay: {}", stream.overlay_mode);
    println!("  Speed: {}", stream.movement_mode);
    println!("  Auto-save: {}", stream.auto_save);
    println!();
    println!("{}", serde_json::to_string_pretty(&StreamRecord::capture(&stream))?);
    Ok(())
}
