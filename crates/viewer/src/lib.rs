//! Regioncast Viewer
//!
//! The orchestrator loop. Owns the stream config and the capture engine,
//! annotates each extracted frame, hands it to a [`DisplaySink`], and applies
//! the operator commands the sink reports.
//!
//! The loop is the only writer of the stream config. Front ends that read
//! input on other threads must queue commands and return them from
//! [`DisplaySink::next_command`].

pub mod sink;
pub mod snapshot;
pub mod viewer;

pub use sink::DisplaySink;
pub use snapshot::{snapshot_file_name, write_snapshot};
pub use viewer::{Flow, RunSummary, Viewer, ViewerOptions};
