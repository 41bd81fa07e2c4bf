//! Timing utilities for the capture and viewer loops.
//!
//! - `FramePacer` spaces out capture cycles to a target frame rate
//! - `RateController` throttles periodic side effects (preview writes)
//! - `snapshot_stamp` formats wall-clock time for snapshot file names

use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone};

/// Schedules loop iterations at a fixed interval.
///
/// If an iteration overruns its slot the schedule re-anchors on the
/// current instant instead of trying to catch up with a burst.
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl FramePacer {
    /// Create a pacer targeting `fps` iterations per second.
    /// A rate of zero disables pacing.
    pub fn new(fps: u32) -> Self {
        let interval = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / fps as u64)
        };
        Self {
            interval,
            next_deadline: None,
        }
    }

    /// Delay to wait before the next iteration, advancing the schedule.
    pub fn next_delay(&mut self, now: Instant) -> Duration {
        if self.interval.is_zero() {
            return Duration::ZERO;
        }
        let deadline = self.next_deadline.unwrap_or(now);
        let delay = deadline.saturating_duration_since(now);
        self.next_deadline = Some(deadline.max(now) + self.interval);
        delay
    }

    /// Sleep until the next slot.
    pub fn wait(&mut self) {
        let delay = self.next_delay(Instant::now());
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    /// Target interval between iterations.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Rate limiter for periodic work.
#[derive(Debug)]
pub struct RateController {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl RateController {
    /// Create a controller that fires at most once per `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, now: Instant) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                true
            }
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last_tick = Some(now);
                true
            }
            _ => false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// `YYYYmmdd_HHMMSS` form of a timestamp, used in snapshot file names.
pub fn snapshot_stamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y%m%d_%H%M%S").to_string()
}
