//! Screen sources the capture loop samples from.

use regioncast_common::error::RegioncastResult;
use regioncast_region_model::Frame;

pub mod monitor;
pub mod synthetic;

pub use monitor::{list_monitors, MonitorSelector, MonitorSource, MonitorSummary};
pub use synthetic::SyntheticSource;

/// Supplies one full-resolution frame per call.
///
/// Implementations are moved onto the capture thread, so they must be
/// `Send`. A failed grab is a per-cycle error; the loop backs off and
/// retries.
pub trait ScreenSource: Send {
    /// Acquire the full screen.
    fn grab(&mut self) -> RegioncastResult<Frame>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

impl ScreenSource for Box<dyn ScreenSource> {
    fn grab(&mut self) -> RegioncastResult<Frame> {
        (**self).grab()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
