//! Console display sink.
//!
//! Commands are read line by line from stdin on a helper thread and queued
//! for the viewer loop. Annotated frames go to an optional preview PNG,
//! rewritten at most once per interval.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use regioncast_common::clock::RateController;
use regioncast_common::error::{RegioncastError, RegioncastResult};
use regioncast_control::Command;
use regioncast_region_model::Frame;
use regioncast_viewer::DisplaySink;

pub struct ConsoleSink {
    commands: Receiver<Command>,
    preview: Option<PathBuf>,
    throttle: RateController,
}

impl ConsoleSink {
    /// Start the stdin reader thread.
    pub fn spawn(preview: Option<PathBuf>, interval: Duration) -> anyhow::Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        std::thread::Builder::new()
            .name("regioncast-stdin".to_string())
            .spawn(move || read_commands(std::io::stdin().lock(), &tx))?;
        Ok(Self::with_receiver(rx, preview, interval))
    }

    pub fn with_receiver(
        commands: Receiver<Command>,
        preview: Option<PathBuf>,
        interval: Duration,
    ) -> Self {
        Self {
            commands,
            preview,
            throttle: RateController::with_interval(interval),
        }
    }
}

impl DisplaySink for ConsoleSink {
    fn present(&mut self, frame: &Frame) -> RegioncastResult<()> {
        let Some(path) = &self.preview else {
            return Ok(());
        };
        if !self.throttle.should_tick(Instant::now()) {
            return Ok(());
        }
        write_preview(frame, path)
    }

    fn next_command(&mut self) -> Option<Command> {
        self.commands.try_recv().ok()
    }
}

/// Write through a temporary file so viewers never read a half-written PNG.
fn write_preview(frame: &Frame, path: &Path) -> RegioncastResult<()> {
    let tmp = path.with_extension("tmp.png");
    frame
        .save_with_format(&tmp, image::ImageFormat::Png)
        .map_err(|e| RegioncastError::render(format!("Preview write failed: {e}")))?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Parse commands from `input` until EOF, then request quit.
fn read_commands(input: impl BufRead, tx: &Sender<Command>) {
    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if tx.send(command).is_err() {
                    return;
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }
    tracing::debug!("stdin closed");
    let _ = tx.send(Command::Quit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use regioncast_control::Direction;
    use std::io::Cursor;

    #[test]
    fn test_reader_skips_bad_lines_and_quits_on_eof() {
        let (tx, rx) = crossbeam_channel::unbounded();
        read_commands(Cursor::new("left 2\nbogus\n\nsnap\n"), &tx);

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                Command::Move {
                    direction: Direction::Left,
                    steps: 2
                },
                Command::Snapshot,
                Command::Quit,
            ]
        );
    }

    #[test]
    fn test_next_command_never_blocks() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ConsoleSink::with_receiver(rx, None, Duration::from_millis(250));
        assert_eq!(sink.next_command(), None);
        tx.send(Command::Grow).unwrap();
        assert_eq!(sink.next_command(), Some(Command::Grow));
    }

    #[test]
    fn test_preview_is_throttled() {
        let path = std::env::temp_dir().join(format!(
            "regioncast_test_preview_{}.png",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let (_tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ConsoleSink::with_receiver(rx, Some(path.clone()), Duration::from_secs(3600));
        let frame = Frame::from_pixel(8, 8, Rgb([9, 9, 9]));

        sink.present(&frame).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();

        sink.present(&frame).unwrap();
        assert!(!path.exists());
    }
}
