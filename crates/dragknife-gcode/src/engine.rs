//! Motion compensation engine
//!
//! Transforms each motion line of a G-code stream into the moves a drag
//! knife needs. The blade trails its pivot by `radius`, so:
//! - tool-up travel is wrapped in a lift to the safe height and back down;
//! - at a sharp corner the pivot overshoots the corner by `radius`, the
//!   blade is lifted, pivoted about its tip on the corner and lowered again;
//! - moves too short to complete a rotation are elided.
//!
//! The engine keeps a window of the last few endpoints. One engine lives for
//! one unit régime; a units switch replaces it with a fresh instance.

use std::collections::VecDeque;
use std::ops::AddAssign;

use dragknife_core::{
    distance, shift_from_end, shift_from_start, turn_angle, turn_direction, GeometryError,
    ParameterError, Point,
};
use tracing::{debug, error};

use crate::emit::{arc_move, height_move, linear_move, OutputOp};
use crate::{Block, EngineParams, MotionCode, OutputFilter};

/// Most endpoints the window ever holds
pub const WINDOW_CAPACITY: usize = 4;

/// Counters of what an engine did to its stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Corner rotation maneuvers inserted
    pub rotations: usize,
    /// Travel moves wrapped in a lift
    pub lifts: usize,
    /// Cutting moves elided as too short
    pub skipped: usize,
    /// Elided moves that carried a feedrate or spindle speed
    pub dropped_parameters: usize,
    /// Motion codes passed through without compensation
    pub unexpected_codes: usize,
}

impl AddAssign for EngineStats {
    fn add_assign(&mut self, other: Self) {
        self.rotations += other.rotations;
        self.lifts += other.lifts;
        self.skipped += other.skipped;
        self.dropped_parameters += other.dropped_parameters;
        self.unexpected_codes += other.unexpected_codes;
    }
}

/// Stateful drag knife compensator for one unit régime
#[derive(Debug, Clone)]
pub struct MotionEngine {
    params: EngineParams,
    angle_min: f64,
    angle_max: f64,
    filter: OutputFilter,
    window: VecDeque<Point>,
    z: f64,
    gliding: bool,
    stats: EngineStats,
}

impl MotionEngine {
    /// Create an engine positioned at the origin with z = 0
    pub fn new(params: EngineParams, filter: OutputFilter) -> Result<Self, ParameterError> {
        params.validate()?;
        let (angle_min, angle_max) = params.sharp_band();
        let mut window = VecDeque::with_capacity(WINDOW_CAPACITY);
        window.push_back(Point::ORIGIN);
        Ok(Self {
            params,
            angle_min,
            angle_max,
            filter,
            window,
            z: 0.0,
            gliding: false,
            stats: EngineStats::default(),
        })
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Current position in the plane
    pub fn position(&self) -> Point {
        self.window.back().copied().unwrap_or(Point::ORIGIN)
    }

    /// Last known cutting height
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Endpoints retained for corner analysis, oldest first
    pub fn window(&self) -> Vec<Point> {
        self.window.iter().copied().collect()
    }

    pub fn is_gliding(&self) -> bool {
        self.gliding
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    fn push(&mut self, point: Point) {
        if self.window.len() == WINDOW_CAPACITY {
            self.window.pop_front();
        }
        self.window.push_back(point);
    }

    /// Process one motion line
    ///
    /// `block` carries the line's words; absent axes keep their previous
    /// value. `code` is the command text, used in log messages. The returned
    /// operations are already passed through the engine's output filter.
    pub fn process(
        &mut self,
        motion: &MotionCode,
        block: &Block,
        code: &str,
    ) -> Result<Vec<OutputOp>, GeometryError> {
        let previous = self.position();
        let target = Point::new(
            block.x.unwrap_or(previous.x),
            block.y.unwrap_or(previous.y),
        );
        self.z = block.z.unwrap_or(self.z);

        let mut ops = Vec::new();
        if target == previous {
            // no displacement in the plane: the oldest point makes room
            self.window.pop_front();
            self.window.push_back(target);
            ops.push(OutputOp::RawLine);
        } else {
            self.push(target);
            match motion {
                MotionCode::Rapid => self.travel(target, code, &mut ops),
                MotionCode::Linear => self.cut(block, code, &mut ops)?,
                MotionCode::ArcCw | MotionCode::ArcCcw | MotionCode::Unknown(_) => {
                    error!("unexpected motion code {}: {}", motion, code.trim());
                    self.stats.unexpected_codes += 1;
                    ops.push(OutputOp::RawLine);
                }
            }
        }

        ops.retain(|op| self.filter.keep(op));
        Ok(ops)
    }

    fn travel(&mut self, target: Point, code: &str, ops: &mut Vec<OutputOp>) {
        self.window.clear();
        self.window.push_back(target);
        self.gliding = false;
        self.stats.lifts += 1;
        debug!("raising blade: {}", code.trim());

        ops.push(height_move(self.z + self.params.safe_retract));
        ops.push(OutputOp::RawLine);
        ops.push(height_move(self.z));
    }

    fn cut(
        &mut self,
        block: &Block,
        code: &str,
        ops: &mut Vec<OutputOp>,
    ) -> Result<(), GeometryError> {
        let n = self.window.len();
        let length = distance(self.window[n - 2], self.window[n - 1]);
        self.gliding = !self.gliding && length <= self.params.radius && n >= 3;

        if !self.gliding {
            if let Some((p0, corner, p2)) = self.sharp_corner() {
                if length < self.params.radius {
                    // too close to the corner to rotate; wait for a longer move
                    self.gliding = true;
                } else {
                    self.rotate(p0, corner, p2, code, ops)?;
                }
            }
        }

        if self.gliding {
            self.window.pop_back();
            self.stats.skipped += 1;
            if block.has_feed_or_speed {
                self.stats.dropped_parameters += 1;
                error!("skipping feedrate or speed: {}", code.trim());
            } else {
                debug!("skipping: {}", code.trim());
            }
        } else {
            ops.push(OutputOp::RawLine);
        }

        while self.window.len() > 3 {
            self.window.pop_front();
        }
        Ok(())
    }

    /// Last three endpoints when they form a sharp turn
    ///
    /// Needs two completed segments; an incoming segment of zero length
    /// (left behind by a degenerate move) is not a corner.
    fn sharp_corner(&self) -> Option<(Point, Point, Point)> {
        let n = self.window.len();
        if n < 3 {
            return None;
        }
        let (p0, corner, p2) = (self.window[n - 3], self.window[n - 2], self.window[n - 1]);
        if p0 == corner {
            return None;
        }
        let angle = turn_angle(p0, corner, p2);
        (self.angle_min < angle && angle < self.angle_max).then_some((p0, corner, p2))
    }

    fn rotate(
        &mut self,
        p0: Point,
        corner: Point,
        p2: Point,
        code: &str,
        ops: &mut Vec<OutputOp>,
    ) -> Result<(), GeometryError> {
        let radius = self.params.radius;
        let travel = shift_from_end(p0, corner, radius)?;
        let swivel = shift_from_start(corner, p2, radius)?;
        let turn = turn_direction(p0, corner, p2);
        self.stats.rotations += 1;
        debug!("rotating blade at {}: {}", corner, code.trim());

        ops.extend(linear_move(corner, travel));
        ops.push(height_move(self.z + self.params.rotation_retract));
        ops.extend(arc_move(turn, travel, swivel, corner));
        ops.push(height_move(self.z));
        Ok(())
    }
}
