//! Operator commands.
//!
//! Sinks report abstract [`Command`]s. Console front ends type them as short
//! words, parsed with [`str::parse`]:
//!
//! ```text
//! left|right|up|down [N]     move N steps (default 1)
//! grow | +                   grow 10 px per axis
//! shrink | -                 shrink 10 px per axis
//! overlay <0-4>              set overlay mode by rank
//! border                     toggle None <-> Minimal
//! speed                      cycle speed tier
//! reset                      restore the home region
//! save                       persist the stream config
//! snap | snapshot            write the latest raw frame to PNG
//! calibrate <x> <y> <w> <h>  place the region absolutely
//! quit | q                   stop the viewer
//! ```

use std::str::FromStr;

use regioncast_common::error::RegioncastError;
use regioncast_region_model::{CaptureRegion, OverlayMode};

/// Direction of a move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step in screen coordinates (y grows downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// A single operator request handled by the viewer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { direction: Direction, steps: i32 },
    Grow,
    Shrink,
    SetOverlay(OverlayMode),
    ToggleBorder,
    CycleSpeed,
    Reset,
    Save,
    Snapshot,
    Calibrate(CaptureRegion),
    Quit,
}

impl Command {
    /// One-step move.
    pub fn step(direction: Direction) -> Self {
        Command::Move {
            direction,
            steps: 1,
        }
    }
}

impl FromStr for Command {
    type Err = RegioncastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            return Err(RegioncastError::invalid_command("empty command"));
        };
        let args: Vec<&str> = words.collect();
        let head = head.to_ascii_lowercase();

        let direction = match head.as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        };
        if let Some(direction) = direction {
            let steps = match args.as_slice() {
                [] => 1,
                [n] => parse_int(&head, n)?,
                _ => return Err(too_many(&head)),
            };
            return Ok(Command::Move { direction, steps });
        }

        let command = match head.as_str() {
            "grow" | "+" => Command::Grow,
            "shrink" | "-" => Command::Shrink,
            "border" => Command::ToggleBorder,
            "speed" => Command::CycleSpeed,
            "reset" => Command::Reset,
            "save" => Command::Save,
            "snap" | "snapshot" => Command::Snapshot,
            "quit" | "q" => Command::Quit,
            "overlay" => {
                let [rank] = args.as_slice() else {
                    return Err(RegioncastError::invalid_command(
                        "usage: overlay <0-4>",
                    ));
                };
                let mode = rank
                    .parse::<u8>()
                    .ok()
                    .and_then(OverlayMode::from_rank)
                    .ok_or_else(|| {
                        RegioncastError::invalid_command(format!(
                            "overlay mode must be 0-4, got '{rank}'"
                        ))
                    })?;
                return Ok(Command::SetOverlay(mode));
            }
            "calibrate" => {
                let [x, y, w, h] = args.as_slice() else {
                    return Err(RegioncastError::invalid_command(
                        "usage: calibrate <x> <y> <w> <h>",
                    ));
                };
                return Ok(Command::Calibrate(CaptureRegion::new(
                    parse_int(&head, x)?,
                    parse_int(&head, y)?,
                    parse_int(&head, w)?,
                    parse_int(&head, h)?,
                )));
            }
            other => {
                return Err(RegioncastError::invalid_command(format!(
                    "unknown command '{other}'"
                )))
            }
        };

        if !args.is_empty() {
            return Err(too_many(&head));
        }
        Ok(command)
    }
}

fn parse_int(command: &str, value: &str) -> Result<i32, RegioncastError> {
    value.parse().map_err(|_| {
        RegioncastError::invalid_command(format!("{command}: '{value}' is not an integer"))
    })
}

fn too_many(command: &str) -> RegioncastError {
    RegioncastError::invalid_command(format!("{command}: unexpected arguments"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!("left".parse::<Command>().unwrap(), Command::step(Direction::Left));
        assert_eq!(
            "  DOWN 4 ".parse::<Command>().unwrap(),
            Command::Move {
                direction: Direction::Down,
                steps: 4
            }
        );
        assert_eq!(
            "right -2".parse::<Command>().unwrap(),
            Command::Move {
                direction: Direction::Right,
                steps: -2
            }
        );
    }

    #[test]
    fn test_parse_aliases() {
        let pairs = [
            ("+", Command::Grow),
            ("grow", Command::Grow),
            ("-", Command::Shrink),
            ("shrink", Command::Shrink),
            ("snap", Command::Snapshot),
            ("snapshot", Command::Snapshot),
            ("q", Command::Quit),
            ("quit", Command::Quit),
            ("border", Command::ToggleBorder),
            ("speed", Command::CycleSpeed),
            ("reset", Command::Reset),
            ("save", Command::Save),
        ];
        for (text, expected) in pairs {
            assert_eq!(text.parse::<Command>().unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn test_parse_overlay_and_calibrate() {
        assert_eq!(
            "overlay 4".parse::<Command>().unwrap(),
            Command::SetOverlay(OverlayMode::Debug)
        );
        assert_eq!(
            "calibrate -10 20 300 200".parse::<Command>().unwrap(),
            Command::Calibrate(CaptureRegion::new(-10, 20, 300, 200))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for text in [
            "",
            "   ",
            "jump",
            "overlay",
            "overlay 5",
            "overlay x",
            "calibrate 1 2 3",
            "left two",
            "left 1 2",
            "quit now",
        ] {
            let err = text.parse::<Command>().unwrap_err();
            assert!(
                matches!(err, RegioncastError::InvalidCommand { .. }),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn test_direction_deltas_cancel() {
        let (lx, ly) = Direction::Left.delta();
        let (rx, ry) = Direction::Right.delta();
        assert_eq!((lx + rx, ly + ry), (0, 0));
        assert_eq!(Direction::Up.delta(), (0, -1));
    }
}
