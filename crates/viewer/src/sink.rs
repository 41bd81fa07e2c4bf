//! Display sink seam.

use regioncast_common::error::RegioncastResult;
use regioncast_control::Command;
use regioncast_region_model::Frame;

/// Where annotated frames go and where operator commands come from.
pub trait DisplaySink {
    /// Show one annotated frame. Errors are logged by the viewer, which keeps
    /// running.
    fn present(&mut self, frame: &Frame) -> RegioncastResult<()>;

    /// Next pending command, if any. Must not block.
    fn next_command(&mut self) -> Option<Command>;
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn present(&mut self, frame: &Frame) -> RegioncastResult<()> {
        (**self).present(frame)
    }

    fn next_command(&mut self) -> Option<Command> {
        (**self).next_command()
    }
}
