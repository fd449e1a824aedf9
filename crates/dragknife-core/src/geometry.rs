//! Geometric primitives over 2D points
//!
//! Pure functions used by the motion compensation engine to analyse the
//! last two segments of a toolpath: segment length, turn handedness,
//! turn angle and points shifted along a segment.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;

use crate::error::GeometryError;

/// A point in the cutting plane
///
/// Two points are the same only if both coordinates compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

/// Handedness of a turn between two consecutive segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    /// Right-hand turn
    Clockwise,
    /// Left-hand turn (also reported for colinear points)
    CounterClockwise,
}

impl TurnDirection {
    /// Circular motion word pivoting in this direction
    pub fn arc_command(&self) -> &'static str {
        match self {
            Self::Clockwise => "G2",
            Self::CounterClockwise => "G3",
        }
    }
}

/// Which endpoint of a segment a shift is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
}

/// Euclidean distance between two points
pub fn distance(p0: Point, p1: Point) -> f64 {
    (p0.x - p1.x).hypot(p0.y - p1.y)
}

/// Direction of the turn p0 -> p1 -> p2
///
/// Uses the sign of the cross product of (p1 - p0) and (p2 - p1); colinear
/// points report `CounterClockwise`.
pub fn turn_direction(p0: Point, p1: Point, p2: Point) -> TurnDirection {
    let (v1x, v1y) = (p1.x - p0.x, p1.y - p0.y);
    let (v2x, v2y) = (p2.x - p1.x, p2.y - p1.y);
    if v1x * v2y - v1y * v2x < 0.0 {
        TurnDirection::Clockwise
    } else {
        TurnDirection::CounterClockwise
    }
}

/// Inclination of the line through a and b, in radians within [-pi/2, pi/2]
fn inclination(a: Point, b: Point) -> f64 {
    if a.x == b.x {
        FRAC_PI_2
    } else {
        ((b.y - a.y) / (b.x - a.x)).atan()
    }
}

/// Unsigned angle in degrees between the lines p0-p1 and p1-p2
///
/// Computed as the absolute difference of both inclinations, so the result
/// lies in [0, 180]. Parallel lines give a value near 0 or near 180.
pub fn turn_angle(p0: Point, p1: Point, p2: Point) -> f64 {
    (inclination(p1, p2) - inclination(p0, p1)).abs().to_degrees()
}

/// Point at `length` along the direction p0 -> p1, measured from `anchor`
///
/// From `Anchor::Start` the result lies on the ray p0 -> p1; from
/// `Anchor::End` it continues past p1 in the same direction.
pub fn shift(anchor: Anchor, p0: Point, p1: Point, length: f64) -> Result<Point, GeometryError> {
    let d = distance(p0, p1);
    if d == 0.0 {
        return Err(GeometryError::DegenerateSegment { x: p0.x, y: p0.y });
    }
    let base = match anchor {
        Anchor::Start => p0,
        Anchor::End => p1,
    };
    Ok(Point::new(
        base.x + length * (p1.x - p0.x) / d,
        base.y + length * (p1.y - p0.y) / d,
    ))
}

/// Point at `length` from p0 towards p1
pub fn shift_from_start(p0: Point, p1: Point, length: f64) -> Result<Point, GeometryError> {
    shift(Anchor::Start, p0, p1, length)
}

/// Point at `length` past p1, continuing the direction p0 -> p1
pub fn shift_from_end(p0: Point, p1: Point, length: f64) -> Result<Point, GeometryError> {
    shift(Anchor::End, p0, p1, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9, "expected {}, got {}", b, a);
    }

    #[test]
    fn test_distance() {
        approx_eq(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        approx_eq(distance(Point::new(-1.0, -1.0), Point::new(-1.0, -1.0)), 0.0);
    }

    #[test]
    fn test_turn_direction() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(
            turn_direction(a, b, Point::new(10.0, 10.0)),
            TurnDirection::CounterClockwise
        );
        assert_eq!(
            turn_direction(a, b, Point::new(10.0, -10.0)),
            TurnDirection::Clockwise
        );
    }

    #[test]
    fn test_colinear_is_counter_clockwise() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(5.0, 5.0);
        let c = Point::new(10.0, 10.0);
        assert_eq!(turn_direction(a, b, c), TurnDirection::CounterClockwise);
        assert_eq!(turn_direction(c, b, a), TurnDirection::CounterClockwise);
    }

    #[test]
    fn test_turn_angle_right_angle() {
        let angle = turn_angle(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        );
        approx_eq(angle, 90.0);
    }

    #[test]
    fn test_turn_angle_straight() {
        let angle = turn_angle(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        );
        approx_eq(angle, 0.0);
    }

    #[test]
    fn test_turn_angle_vertical_segments() {
        // Both segments vertical: no slope division
        let angle = turn_angle(
            Point::new(0.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(0.0, 10.0),
        );
        approx_eq(angle, 0.0);

        let angle = turn_angle(
            Point::new(0.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(5.0, 10.0),
        );
        approx_eq(angle, 45.0);
    }

    #[test]
    fn test_shift_from_start() {
        let p = shift_from_start(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0).unwrap();
        assert_eq!(p, Point::new(2.0, 0.0));
    }

    #[test]
    fn test_shift_from_end_continues_past_segment() {
        let p = shift_from_end(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0).unwrap();
        assert_eq!(p, Point::new(12.0, 0.0));
    }

    #[test]
    fn test_shift_degenerate_segment() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(
            shift_from_start(p, p, 1.0),
            Err(GeometryError::DegenerateSegment { x: 3.0, y: 4.0 })
        );
    }

    #[test]
    fn test_arc_command() {
        assert_eq!(TurnDirection::Clockwise.arc_command(), "G2");
        assert_eq!(TurnDirection::CounterClockwise.arc_command(), "G3");
    }
}
