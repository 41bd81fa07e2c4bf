//! Regioncast Control
//!
//! Operator-facing edits of the stream settings:
//! - **Movement:** move, resize, reset and speed cycling of the capture region
//! - **Commands:** the abstract command set a display sink produces, with a
//!   textual form for console input
//!
//! Pure state manipulation. No threads and no I/O.

pub mod command;
pub mod movement;

pub use command::{Command, Direction};
pub use movement::MovementController;
