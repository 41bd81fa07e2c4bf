//! The orchestrator loop.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use regioncast_capture_engine::{CaptureEngine, CaptureSettings, CaptureStats, ScreenSource};
use regioncast_common::config::ViewerDefaults;
use regioncast_common::error::{RegioncastError, RegioncastResult};
use regioncast_control::{Command, MovementController};
use regioncast_region_model::{CaptureRegion, ConfigStore, Frame, OverlayMode, StreamConfig};
use regioncast_render_engine::{OverlayContext, OverlayRenderer};

use crate::sink::DisplaySink;
use crate::snapshot::write_snapshot;

/// Loop tuning that is not part of the persisted stream config.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Sleep when no frame is ready.
    pub idle_backoff: Duration,

    /// Directory snapshots are written to.
    pub snapshot_dir: PathBuf,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self::from(&ViewerDefaults::default())
    }
}

impl From<&ViewerDefaults> for ViewerOptions {
    fn from(defaults: &ViewerDefaults) -> Self {
        Self {
            idle_backoff: defaults.idle_backoff(),
            snapshot_dir: defaults.snapshot_dir.clone(),
        }
    }
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames_presented: u64,
    pub commands_handled: u64,
    pub snapshots_written: u64,
    pub region: CaptureRegion,
    pub capture: CaptureStats,
}

/// Ties the capture engine, overlay renderer and operator commands together.
pub struct Viewer<S: DisplaySink> {
    config: StreamConfig,
    engine: CaptureEngine,
    renderer: OverlayRenderer,
    movement: MovementController,
    store: ConfigStore,
    sink: S,
    options: ViewerOptions,
    latest: Option<Frame>,
    frames_presented: u64,
    commands_handled: u64,
    snapshots_written: u64,
}

impl<S: DisplaySink> Viewer<S> {
    /// Build a viewer whose capture engine samples `source` and follows the
    /// region of `config`.
    pub fn new(
        config: StreamConfig,
        source: impl ScreenSource + 'static,
        settings: CaptureSettings,
        sink: S,
        options: ViewerOptions,
    ) -> Self {
        let engine = CaptureEngine::new(source, config.region.clone(), settings);
        Self {
            config,
            engine,
            renderer: OverlayRenderer::default(),
            movement: MovementController::default(),
            store: ConfigStore,
            sink,
            options,
            latest: None,
            frames_presented: 0,
            commands_handled: 0,
            snapshots_written: 0,
        }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn engine(&self) -> &CaptureEngine {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run until the sink asks to quit or the capture loop dies.
    ///
    /// Always stops the engine and, if enabled, saves the stream config
    /// before returning. A stop timeout is returned as an error even when the
    /// loop itself ended cleanly.
    pub fn run(&mut self) -> RegioncastResult<RunSummary> {
        self.engine.start()?;
        info!(
            region = %self.config.region(),
            overlay = %self.config.overlay_mode,
            speed = %self.config.movement_mode,
            "Viewer started"
        );

        let outcome = self.run_loop();
        let stopped = self.engine.stop();

        if self.config.auto_save {
            match self.store.save(&self.config) {
                Ok(()) => info!(path = %self.config.config_file.display(), "Stream config saved"),
                Err(e) => warn!(error = %e, "Auto-save failed"),
            }
        }

        if let (Err(_), Err(stop_err)) = (&outcome, &stopped) {
            error!(error = %stop_err, "Engine stop failed after loop error");
        }
        outcome?;
        stopped?;

        let summary = self.summary();
        info!(
            frames_presented = summary.frames_presented,
            commands_handled = summary.commands_handled,
            snapshots_written = summary.snapshots_written,
            drop_rate = summary.capture.drop_rate(),
            "Viewer finished"
        );
        Ok(summary)
    }

    fn run_loop(&mut self) -> RegioncastResult<()> {
        loop {
            match self.engine.poll_frame() {
                Some(frame) => self.present(frame),
                None => {
                    if !self.engine.is_running() {
                        return Err(RegioncastError::capture("Capture loop exited unexpectedly"));
                    }
                    std::thread::sleep(self.options.idle_backoff);
                }
            }

            if let Some(command) = self.sink.next_command() {
                if self.handle(command) == Flow::Quit {
                    info!("Quit requested");
                    return Ok(());
                }
            }
        }
    }

    fn present(&mut self, frame: Frame) {
        let ctx = OverlayContext {
            region: self.config.region(),
            speed: self.config.movement_mode,
            screen: self.engine.screen_bounds(),
        };
        let annotated = self.renderer.render(&frame, self.config.overlay_mode, &ctx);

        match self.sink.present(&annotated) {
            Ok(()) => self.frames_presented += 1,
            Err(e) => warn!(error = %e, "Display sink failed to present frame"),
        }
        self.latest = Some(frame);
    }

    /// Apply one operator command.
    ///
    /// Failed saves and snapshots are logged; the loop keeps running.
    pub fn handle(&mut self, command: Command) -> Flow {
        debug!(?command, "Handling command");
        self.commands_handled += 1;

        match command {
            Command::Move { direction, steps } => {
                let (dx, dy) = direction.delta();
                self.movement
                    .move_by(&self.config, dx.saturating_mul(steps), dy.saturating_mul(steps));
            }
            Command::Grow => {
                self.movement.grow(&self.config);
            }
            Command::Shrink => {
                self.movement.shrink(&self.config);
            }
            Command::SetOverlay(mode) => {
                self.config.overlay_mode = mode;
                info!(overlay = %mode, "Overlay mode changed");
            }
            Command::ToggleBorder => {
                self.config.overlay_mode = match self.config.overlay_mode {
                    OverlayMode::None => OverlayMode::Minimal,
                    _ => OverlayMode::None,
                };
                info!(overlay = %self.config.overlay_mode, "Overlay mode changed");
            }
            Command::CycleSpeed => {
                self.movement.cycle_speed(&mut self.config);
                info!(speed = %self.config.movement_mode, "Movement speed changed");
            }
            Command::Reset => {
                self.movement.reset(&self.config);
                info!("Region reset");
            }
            Command::Save => match self.store.save(&self.config) {
                Ok(()) => info!(path = %self.config.config_file.display(), "Stream config saved"),
                Err(e) => warn!(error = %e, "Saving stream config failed"),
            },
            Command::Snapshot => {
                if let Err(e) = self.snapshot() {
                    warn!(error = %e, "Snapshot failed");
                }
            }
            Command::Calibrate(region) => {
                if self.movement.set_region(&self.config, region) {
                    info!(region = %region, "Region calibrated");
                } else {
                    warn!(region = %region, "Ignoring calibration with empty size");
                }
            }
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    fn snapshot(&mut self) -> RegioncastResult<()> {
        let Some(frame) = &self.latest else {
            warn!("No frame captured yet, snapshot skipped");
            return Ok(());
        };
        write_snapshot(frame, &self.options.snapshot_dir, &chrono::Local::now())?;
        self.snapshots_written += 1;
        Ok(())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames_presented: self.frames_presented,
            commands_handled: self.commands_handled,
            snapshots_written: self.snapshots_written,
            region: self.config.region(),
            capture: self.engine.stats(),
        }
    }
}
