pub mod check;
pub mod config;
pub mod snapshot;
pub mod view;

use std::path::PathBuf;

use regioncast_capture_engine::{MonitorSelector, MonitorSource, ScreenSource, SyntheticSource};
use regioncast_common::config::AppConfig;
use regioncast_region_model::{ConfigStore, LoadStatus, StreamConfig};

/// Parse a `WIDTHxHEIGHT` size such as `1280x720`.
pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{value}'"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    if w == 0 || h == 0 {
        return Err("size must be non-zero".to_string());
    }
    Ok((w, h))
}

/// Stream config from `path` (or the configured default file).
pub fn load_stream_config(app: &AppConfig, path: Option<PathBuf>) -> StreamConfig {
    let file = path.unwrap_or_else(|| app.viewer.stream_config_file.clone());
    let mut config = StreamConfig::with_file(file);
    config.auto_save = app.viewer.auto_save;

    match ConfigStore.load(&mut config) {
        LoadStatus::Applied => tracing::info!(
            path = %config.config_file.display(),
            region = %config.region(),
            "Loaded stream config"
        ),
        LoadStatus::NotFound => tracing::info!(
            path = %config.config_file.display(),
            "Using default stream config"
        ),
    }
    config
}

/// Monitor capture, or a synthetic screen when a size is given.
pub fn screen_source(monitor: Option<usize>, synthetic: Option<(u32, u32)>) -> Box<dyn ScreenSource> {
    match synthetic {
        Some((w, h)) => Box::new(SyntheticSource::new(w, h)),
        None => Box::new(MonitorSource::new(MonitorSelector::from(monitor))),
    }
}
