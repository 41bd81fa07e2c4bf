//! Capture engine lifecycle and the sampling loop.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use regioncast_common::clock::FramePacer;
use regioncast_common::config::CaptureDefaults;
use regioncast_common::error::{RegioncastError, RegioncastResult};
use regioncast_region_model::{Frame, ScreenBounds, SharedRegion};

use crate::backend::ScreenSource;
use crate::buffer::{FrameBuffer, DEFAULT_BUFFER_CAPACITY};
use crate::extract::extract_region;

/// Tunables for the sampling loop.
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    /// Target sampling rate. Zero samples as fast as the source allows.
    pub fps: u32,

    /// Hand-off buffer slots.
    pub buffer_capacity: usize,

    /// Pause after a failed grab.
    pub error_backoff: Duration,

    /// Upper bound on how long `stop()` waits for the loop to exit.
    pub stop_timeout: Duration,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            fps: 30,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            error_backoff: Duration::from_millis(100),
            stop_timeout: Duration::from_secs(2),
        }
    }
}

impl From<&CaptureDefaults> for CaptureSettings {
    fn from(defaults: &CaptureDefaults) -> Self {
        Self {
            fps: defaults.fps,
            buffer_capacity: defaults.buffer_capacity,
            error_backoff: defaults.error_backoff(),
            stop_timeout: defaults.stop_timeout(),
        }
    }
}

/// Lifecycle of a [`CaptureEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created, loop not spawned.
    Idle,
    /// Sampling loop running.
    Running,
    /// Loop stopped. Terminal.
    Stopped,
}

/// Runtime statistics from the sampling loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CaptureStats {
    /// Frames extracted and published.
    pub frames_captured: u64,

    /// Frames evicted from the buffer before the viewer took them.
    pub frames_dropped: u64,

    /// Grabs that failed and were retried.
    pub failed_grabs: u64,
}

impl CaptureStats {
    /// Drop rate as a percentage.
    pub fn drop_rate(&self) -> f64 {
        if self.frames_captured == 0 {
            return 0.0;
        }
        self.frames_dropped as f64 / self.frames_captured as f64 * 100.0
    }
}

#[derive(Debug, Default)]
struct Counters {
    frames_captured: AtomicU64,
    failed_grabs: AtomicU64,
}

/// Samples a [`ScreenSource`] on a background thread and publishes the
/// extracted region into a drop-oldest buffer.
pub struct CaptureEngine {
    settings: CaptureSettings,
    state: EngineState,
    region: SharedRegion,
    source: Option<Box<dyn ScreenSource>>,
    buffer: Arc<FrameBuffer<Frame>>,
    stop_flag: Arc<AtomicBool>,
    counters: Arc<Counters>,
    screen: Arc<AtomicU64>,
    worker: Option<JoinHandle<()>>,
    exited: Option<Receiver<()>>,
}

impl CaptureEngine {
    /// Create an idle engine that extracts `region` from `source`.
    pub fn new(
        source: impl ScreenSource + 'static,
        region: SharedRegion,
        settings: CaptureSettings,
    ) -> Self {
        let buffer = Arc::new(FrameBuffer::new(settings.buffer_capacity));
        Self {
            settings,
            state: EngineState::Idle,
            region,
            source: Some(Box::new(source)),
            buffer,
            stop_flag: Arc::new(AtomicBool::new(false)),
            counters: Arc::new(Counters::default()),
            screen: Arc::new(AtomicU64::new(0)),
            worker: None,
            exited: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Spawn the sampling loop.
    pub fn start(&mut self) -> RegioncastResult<()> {
        if self.state != EngineState::Idle {
            return Err(RegioncastError::capture(format!(
                "Capture engine cannot start from {:?}",
                self.state
            )));
        }
        let source = self
            .source
            .take()
            .ok_or_else(|| RegioncastError::capture("Capture source already consumed"))?;

        tracing::info!(
            source = %source.name(),
            fps = self.settings.fps,
            buffer_capacity = self.buffer.capacity(),
            "Starting capture engine"
        );

        let (exit_tx, exit_rx) = crossbeam_channel::bounded(1);
        let worker = CaptureWorker {
            source,
            region: self.region.clone(),
            buffer: self.buffer.clone(),
            stop_flag: self.stop_flag.clone(),
            counters: self.counters.clone(),
            screen: self.screen.clone(),
            pacer: FramePacer::new(self.settings.fps),
            error_backoff: self.settings.error_backoff,
        };

        let handle = std::thread::Builder::new()
            .name("regioncast-capture".to_string())
            .spawn(move || worker.run(exit_tx))?;

        self.worker = Some(handle);
        self.exited = Some(exit_rx);
        self.state = EngineState::Running;
        Ok(())
    }

    /// Signal the loop to exit and wait for it.
    ///
    /// Returns `ShutdownTimeout` if the loop is still running after
    /// `stop_timeout`; the thread is then left detached. Stopping an idle
    /// engine just marks it stopped, and stopping twice is a no-op.
    pub fn stop(&mut self) -> RegioncastResult<()> {
        match self.state {
            EngineState::Stopped => return Ok(()),
            EngineState::Idle => {
                self.state = EngineState::Stopped;
                return Ok(());
            }
            EngineState::Running => {}
        }

        tracing::info!("Stopping capture engine");
        self.stop_flag.store(true, Ordering::SeqCst);
        self.state = EngineState::Stopped;

        if let Some(exited) = self.exited.take() {
            match exited.recv_timeout(self.settings.stop_timeout) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
                Err(RecvTimeoutError::Timeout) => {
                    let waited_ms = self.settings.stop_timeout.as_millis() as u64;
                    tracing::error!(waited_ms, "Capture loop did not exit in time");
                    self.worker = None;
                    return Err(RegioncastError::ShutdownTimeout { waited_ms });
                }
            }
        }

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::warn!("Capture thread panicked");
            }
        }

        let stats = self.stats();
        tracing::info!(
            frames_captured = stats.frames_captured,
            frames_dropped = stats.frames_dropped,
            failed_grabs = stats.failed_grabs,
            drop_rate = stats.drop_rate(),
            "Capture engine stopped"
        );
        Ok(())
    }

    /// Whether the sampling thread is alive.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Take the oldest queued frame without waiting.
    pub fn poll_frame(&self) -> Option<Frame> {
        self.buffer.poll()
    }

    /// Size of the most recent full screen frame, once one was grabbed.
    pub fn screen_bounds(&self) -> Option<ScreenBounds> {
        unpack_bounds(self.screen.load(Ordering::Relaxed))
    }

    pub fn stats(&self) -> CaptureStats {
        CaptureStats {
            frames_captured: self.counters.frames_captured.load(Ordering::Relaxed),
            frames_dropped: self.buffer.stats().dropped,
            failed_grabs: self.counters.failed_grabs.load(Ordering::Relaxed),
        }
    }
}

impl Drop for CaptureEngine {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }
}

struct CaptureWorker {
    source: Box<dyn ScreenSource>,
    region: SharedRegion,
    buffer: Arc<FrameBuffer<Frame>>,
    stop_flag: Arc<AtomicBool>,
    counters: Arc<Counters>,
    screen: Arc<AtomicU64>,
    pacer: FramePacer,
    error_backoff: Duration,
}

impl CaptureWorker {
    fn run(mut self, exited: Sender<()>) {
        tracing::info!(source = %self.source.name(), "Capture loop started");

        while !self.stop_flag.load(Ordering::Relaxed) {
            match self.cycle() {
                Ok(frame) => {
                    if self.buffer.push(frame).is_some() {
                        tracing::trace!("Frame buffer full; dropped oldest frame");
                    }
                    self.counters.frames_captured.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    if self.stop_flag.load(Ordering::Relaxed) {
                        break;
                    }
                    self.counters.failed_grabs.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(error = %e, "Capture cycle failed; retrying");
                    std::thread::sleep(self.error_backoff);
                    continue;
                }
            }
            self.pacer.wait();
        }

        tracing::info!(
            frames = self.counters.frames_captured.load(Ordering::Relaxed),
            "Capture loop stopped"
        );
        let _ = exited.send(());
    }

    /// Grab the screen and cut the current region out of it.
    fn cycle(&mut self) -> RegioncastResult<Frame> {
        let full = self.source.grab()?;
        self.screen.store(
            pack_bounds(full.width(), full.height()),
            Ordering::Relaxed,
        );
        extract_region(&full, &self.region.get())
    }
}

fn pack_bounds(width: u32, height: u32) -> u64 {
    ((width as u64) << 32) | height as u64
}

fn unpack_bounds(packed: u64) -> Option<ScreenBounds> {
    if packed == 0 {
        return None;
    }
    Some(ScreenBounds {
        width: (packed >> 32) as u32,
        height: packed as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SyntheticSource;
    use regioncast_region_model::CaptureRegion;
    use std::time::Instant;

    fn fast_settings() -> CaptureSettings {
        CaptureSettings {
            fps: 0,
            buffer_capacity: 4,
            error_backoff: Duration::from_millis(1),
            stop_timeout: Duration::from_secs(2),
        }
    }

    fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        false
    }

    /// Source whose grab never returns until released.
    struct StuckSource {
        release: Arc<AtomicBool>,
    }

    impl ScreenSource for StuckSource {
        fn grab(&mut self) -> RegioncastResult<Frame> {
            while !self.release.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(5));
            }
            Err(RegioncastError::capture("released"))
        }

        fn name(&self) -> &str {
            "stuck"
        }
    }

    #[test]
    fn test_lifecycle_idle_running_stopped() {
        let region = SharedRegion::new(CaptureRegion::new(10, 10, 60, 40));
        let mut engine = CaptureEngine::new(SyntheticSource::new(200, 100), region, fast_settings());
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.poll_frame().is_none());

        engine.start().unwrap();
        assert_eq!(engine.state(), EngineState::Running);
        assert!(engine.start().is_err());

        let mut frame = None;
        assert!(wait_for(|| {
            frame = engine.poll_frame();
            frame.is_some()
        }));
        assert_eq!(frame.unwrap().dimensions(), (60, 40));
        assert_eq!(
            engine.screen_bounds(),
            Some(ScreenBounds {
                width: 200,
                height: 100
            })
        );

        engine.stop().unwrap();
        assert_eq!(engine.state(), EngineState::Stopped);
        assert!(!engine.is_running());
        engine.stop().unwrap();
        assert!(engine.start().is_err());
    }

    #[test]
    fn test_stop_from_idle_is_terminal() {
        let mut engine = CaptureEngine::new(
            SyntheticSource::new(10, 10),
            SharedRegion::default(),
            fast_settings(),
        );
        engine.stop().unwrap();
        assert_eq!(engine.state(), EngineState::Stopped);
        assert!(engine.start().is_err());
    }

    #[test]
    fn test_region_changes_reach_the_loop() {
        let region = SharedRegion::new(CaptureRegion::new(0, 0, 20, 20));
        let mut engine =
            CaptureEngine::new(SyntheticSource::new(200, 100), region.clone(), fast_settings());
        engine.start().unwrap();

        region.set(CaptureRegion::new(5, 5, 90, 30));
        assert!(wait_for(|| engine
            .poll_frame()
            .is_some_and(|f| f.dimensions() == (90, 30))));

        engine.stop().unwrap();
    }

    #[test]
    fn test_transient_failures_do_not_stop_loop() {
        let source = SyntheticSource::new(64, 64).with_failure_every(2);
        let mut engine = CaptureEngine::new(source, SharedRegion::default(), fast_settings());
        engine.start().unwrap();

        assert!(wait_for(|| {
            let stats = engine.stats();
            stats.failed_grabs >= 3 && stats.frames_captured >= 3
        }));
        assert!(engine.is_running());

        engine.stop().unwrap();
    }

    #[test]
    fn test_oversized_region_counts_as_failed_cycle() {
        let region = SharedRegion::new(CaptureRegion::new(0, 0, i32::MAX, i32::MAX));
        let mut engine =
            CaptureEngine::new(SyntheticSource::new(64, 64), region.clone(), fast_settings());
        engine.start().unwrap();

        assert!(wait_for(|| engine.stats().failed_grabs >= 3));
        assert!(engine.is_running());
        assert_eq!(engine.stats().frames_captured, 0);

        region.set(CaptureRegion::new(0, 0, 16, 16));
        assert!(wait_for(|| engine
            .poll_frame()
            .is_some_and(|f| f.dimensions() == (16, 16))));

        engine.stop().unwrap();
    }

    #[test]
    fn test_full_buffer_drops_oldest() {
        let mut engine = CaptureEngine::new(
            SyntheticSource::new(32, 32),
            SharedRegion::new(CaptureRegion::new(0, 0, 8, 8)),
            fast_settings(),
        );
        engine.start().unwrap();
        assert!(wait_for(|| engine.stats().frames_dropped > 0));
        engine.stop().unwrap();

        let queued = std::iter::from_fn(|| engine.poll_frame()).count();
        assert_eq!(queued, 4);
    }

    #[test]
    fn test_stuck_source_escalates_shutdown_timeout() {
        let release = Arc::new(AtomicBool::new(false));
        let settings = CaptureSettings {
            stop_timeout: Duration::from_millis(50),
            ..fast_settings()
        };
        let mut engine = CaptureEngine::new(
            StuckSource {
                release: release.clone(),
            },
            SharedRegion::default(),
            settings,
        );
        engine.start().unwrap();

        let err = engine.stop().unwrap_err();
        assert!(err.is_shutdown_timeout());
        assert_eq!(engine.state(), EngineState::Stopped);

        release.store(true, Ordering::SeqCst);
    }

    #[test]
    fn test_stats_drop_rate() {
        let stats = CaptureStats {
            frames_captured: 200,
            frames_dropped: 50,
            failed_grabs: 0,
        };
        assert!((stats.drop_rate() - 25.0).abs() < 1e-9);
        assert_eq!(CaptureStats::default().drop_rate(), 0.0);
    }

    #[test]
    fn test_bounds_packing() {
        assert_eq!(unpack_bounds(0), None);
        assert_eq!(
            unpack_bounds(pack_bounds(2560, 1440)),
            Some(ScreenBounds {
                width: 2560,
                height: 1440
            })
        );
    }
}
