//! Regioncast Region Model
//!
//! Defines the data contracts shared by capture, rendering and control:
//! - **Region:** the screen rectangle being extracted, and its shared handle
//! - **Modes:** overlay verbosity and movement speed tiers
//! - **StreamConfig:** the live settings the operator edits
//! - **Persist:** the on-disk stream config record
//!
//! Region coordinates are physical screen pixels. They may be negative or
//! run past the screen edge; extraction pads instead of failing.

pub mod frame;
pub mod modes;
pub mod persist;
pub mod region;
pub mod stream;

pub use frame::*;
pub use modes::*;
pub use persist::*;
pub use region::*;
pub use stream::*;
