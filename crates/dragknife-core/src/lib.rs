//! # dragknife core
//!
//! Core types and utilities for dragknife:
//! - Error types shared by every crate
//! - Measurement systems and length conversion
//! - Geometric primitives over 2D points
//! - Drag knife models

pub mod error;
pub mod geometry;
pub mod knife;
pub mod units;

pub use error::{Error, GcodeError, GeometryError, ParameterError, Result};
pub use geometry::{
    distance, shift, shift_from_end, shift_from_start, turn_angle, turn_direction, Anchor, Point,
    TurnDirection,
};
pub use knife::{KnifeLibrary, KnifeSpec, DEFAULT_KNIFE};
pub use units::{MeasurementSystem, MM_PER_INCH};
