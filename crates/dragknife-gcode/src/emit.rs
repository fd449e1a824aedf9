//! Output operations and command formatting

use dragknife_core::{Point, TurnDirection};

/// Prefix of every height move the engine emits
pub const HEIGHT_MOVE_PREFIX: &str = "G0 Z";

/// One element of the engine's output for an input line
#[derive(Debug, Clone, PartialEq)]
pub enum OutputOp {
    /// Echo the input line verbatim
    RawLine,
    /// A complete command line generated by the engine
    Motion(String),
}

impl OutputOp {
    pub fn is_height_move(&self) -> bool {
        matches!(self, OutputOp::Motion(text) if text.starts_with(HEIGHT_MOVE_PREFIX))
    }
}

fn coordinate(axis: char, value: f64) -> String {
    format!("{}{:.4}", axis, value)
}

/// Rapid move to an absolute height
///
/// Always emitted, also when the height does not change.
pub fn height_move(z: f64) -> OutputOp {
    OutputOp::Motion(format!("G0 {}", coordinate('Z', z)))
}

/// Cutting move in the plane; `None` when origin and destination coincide
pub fn linear_move(origin: Point, destination: Point) -> Option<OutputOp> {
    planar_move("G1", origin, destination, None)
}

/// Circular move about `center`; `None` when origin and destination coincide
pub fn arc_move(
    direction: TurnDirection,
    origin: Point,
    destination: Point,
    center: Point,
) -> Option<OutputOp> {
    planar_move(direction.arc_command(), origin, destination, Some(center))
}

fn planar_move(
    command: &str,
    origin: Point,
    destination: Point,
    center: Option<Point>,
) -> Option<OutputOp> {
    if origin == destination {
        return None;
    }
    let mut words = vec![command.to_string()];
    if origin.x != destination.x {
        words.push(coordinate('X', destination.x));
    }
    if origin.y != destination.y {
        words.push(coordinate('Y', destination.y));
    }
    if let Some(center) = center {
        words.push(coordinate('I', center.x - origin.x));
        words.push(coordinate('J', center.y - origin.y));
    }
    Some(OutputOp::Motion(words.join(" ")))
}
