//! Live monitor capture through `xcap`.

use image::DynamicImage;
use xcap::Monitor;

use regioncast_common::error::{RegioncastError, RegioncastResult};
use regioncast_region_model::Frame;

use super::ScreenSource;

/// Which monitor to grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorSelector {
    /// The monitor the OS reports as primary, else the first one.
    #[default]
    Primary,
    /// Zero-based position in the monitor list.
    Index(usize),
}

impl From<Option<usize>> for MonitorSelector {
    fn from(index: Option<usize>) -> Self {
        index.map_or(MonitorSelector::Primary, MonitorSelector::Index)
    }
}

/// Grabs a physical monitor.
///
/// The monitor list is re-resolved on every grab so hot-plugging or a
/// display reconfiguration shows up as a transient failure rather than a
/// stale handle.
pub struct MonitorSource {
    selector: MonitorSelector,
    name: String,
}

impl MonitorSource {
    pub fn new(selector: MonitorSelector) -> Self {
        let name = match selector {
            MonitorSelector::Primary => "monitor:primary".to_string(),
            MonitorSelector::Index(idx) => format!("monitor:{idx}"),
        };
        Self { selector, name }
    }

    fn resolve(&self) -> RegioncastResult<Monitor> {
        let monitors = Monitor::all()
            .map_err(|e| RegioncastError::capture(format!("Failed to enumerate monitors: {e}")))?;
        let count = monitors.len();

        let monitor = match self.selector {
            MonitorSelector::Primary => {
                let primary = monitors
                    .iter()
                    .position(|m| m.is_primary().unwrap_or(false))
                    .unwrap_or(0);
                monitors.into_iter().nth(primary)
            }
            MonitorSelector::Index(idx) => monitors.into_iter().nth(idx),
        };

        monitor.ok_or_else(|| {
            RegioncastError::capture(format!(
                "Monitor {:?} not available ({count} detected)",
                self.selector
            ))
        })
    }
}

impl ScreenSource for MonitorSource {
    fn grab(&mut self) -> RegioncastResult<Frame> {
        let image = self
            .resolve()?
            .capture_image()
            .map_err(|e| RegioncastError::capture(format!("Screen capture failed: {e}")))?;
        Ok(DynamicImage::ImageRgba8(image).to_rgb8())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A monitor as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSummary {
    pub index: usize,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub primary: bool,
}

/// Enumerate monitors for diagnostics.
pub fn list_monitors() -> RegioncastResult<Vec<MonitorSummary>> {
    let monitors = Monitor::all()
        .map_err(|e| RegioncastError::capture(format!("Failed to enumerate monitors: {e}")))?;

    Ok(monitors
        .iter()
        .enumerate()
        .map(|(index, m)| MonitorSummary {
            index,
            name: m.name().unwrap_or_default(),
            width: m.width().unwrap_or(0),
            height: m.height().unwrap_or(0),
            primary: m.is_primary().unwrap_or(false),
        })
        .collect())
}
