//! Regioncast Render Engine
//!
//! Annotates extracted frames with positioning guides. Layers stack by
//! overlay rank:
//!
//! ```text
//! None      (unchanged copy)
//! Minimal   border + corner brackets (red when touching a screen edge)
//! Standard  + translucent info panel: position, size, speed tier
//! Full      + rule-of-thirds grid, crosshair, center dot
//! Debug     + "DEBUG MODE" label
//! ```

pub mod draw;
pub mod overlay;
pub mod text;

pub use overlay::*;
