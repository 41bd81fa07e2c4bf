//! Regioncast Common Utilities
//!
//! Shared infrastructure for all Regioncast crates:
//! - Error types and result aliases
//! - Frame pacing and timestamp helpers
//! - Tracing/logging initialization
//! - Application configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
