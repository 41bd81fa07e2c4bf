//! Regioncast Capture Engine
//!
//! Samples the screen on a background thread, cuts the configured region
//! out of every full frame, and hands the results to the viewer through a
//! bounded buffer that keeps only the freshest frames.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────── capture thread ────────────────────────┐
//! │  ScreenSource ──► extract_region(full, SharedRegion) ──► push  │
//! └────────────────────────────────────────────────────────────┬───┘
//!                                                              ▼
//!                                              FrameBuffer (drop-oldest)
//!                                                              │
//! ┌──────────────────────── viewer thread ─────────────────────┴───┐
//! │  poll_frame() ──► overlay ──► display sink                     │
//! └────────────────────────────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod buffer;
pub mod engine;
pub mod extract;

pub use backend::*;
pub use buffer::*;
pub use engine::*;
pub use extract::*;
