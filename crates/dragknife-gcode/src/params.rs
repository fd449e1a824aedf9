//! Compensation parameters
//!
//! Resolves the physical quantities the motion engine needs (blade radius,
//! rotation lift, travel lift) from the material and the knife model, in
//! whichever unit system the G-code stream is currently using.

use dragknife_core::units::format_length;
use dragknife_core::{KnifeSpec, MeasurementSystem, ParameterError};
use tracing::{info, warn};

/// Smallest sharp-angle threshold accepted from users
pub const MIN_SHARP_ANGLE: u32 = 10;
/// Largest sharp-angle threshold
pub const MAX_SHARP_ANGLE: u32 = 90;
/// Default sharp-angle threshold in degrees
pub const DEFAULT_SHARP_ANGLE: u32 = 20;
/// Clearance above the material for travel moves, in millimetres
pub const DEFAULT_SAFE_CLEARANCE_MM: f64 = 10.0;

/// Parameters of one motion engine, in the units of the stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    /// Effective blade offset; minimum move length around a rotation
    pub radius: f64,
    /// Lift above the cutting height while pivoting at a corner
    pub rotation_retract: f64,
    /// Lift above the cutting height for tool-up travel
    pub safe_retract: f64,
    /// Turns deviating more than this from a straight line are sharp (degrees)
    pub sharp_angle: u32,
}

impl EngineParams {
    /// Check the engine's contract: angle in 0..=90, positive radius, non-negative lifts
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.sharp_angle > MAX_SHARP_ANGLE {
            return Err(ParameterError::SharpAngleOutOfRange {
                angle: self.sharp_angle,
                min: 0,
                max: MAX_SHARP_ANGLE,
            });
        }
        if !(self.radius > 0.0) {
            return Err(ParameterError::NonPositiveRadius {
                radius: self.radius,
            });
        }
        for (name, value) in [
            ("rotation", self.rotation_retract),
            ("safe", self.safe_retract),
        ] {
            if !(value >= 0.0) {
                return Err(ParameterError::NegativeRetract {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Open interval of turn angles that require a rotation, in degrees
    pub fn sharp_band(&self) -> (f64, f64) {
        let angle_min = f64::from(self.sharp_angle);
        (angle_min, 180.0 - angle_min)
    }
}

/// Material and tool selection, lengths in millimetres
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSetup {
    pub thickness_mm: f64,
    pub knife: KnifeSpec,
    pub safe_clearance_mm: f64,
    pub sharp_angle: u32,
}

impl MaterialSetup {
    /// Validate user-facing parameters
    ///
    /// The sharp angle must lie in 10..=90 degrees and the thickness must be
    /// positive. A material thicker than the blade supports is only a warning.
    pub fn new(
        thickness_mm: f64,
        knife: KnifeSpec,
        sharp_angle: u32,
    ) -> Result<Self, ParameterError> {
        if !(MIN_SHARP_ANGLE..=MAX_SHARP_ANGLE).contains(&sharp_angle) {
            return Err(ParameterError::SharpAngleOutOfRange {
                angle: sharp_angle,
                min: MIN_SHARP_ANGLE,
                max: MAX_SHARP_ANGLE,
            });
        }
        if !(thickness_mm.is_finite() && thickness_mm > 0.0) {
            return Err(ParameterError::InvalidThickness {
                thickness: thickness_mm,
            });
        }
        if !knife.supports_thickness(thickness_mm) {
            warn!(
                "{:.3}mm is too thick for knife {} (max {:.3}mm)",
                thickness_mm, knife.name, knife.max_thickness
            );
        }
        Ok(Self {
            thickness_mm,
            knife,
            safe_clearance_mm: DEFAULT_SAFE_CLEARANCE_MM,
            sharp_angle,
        })
    }

    /// Override the travel clearance
    pub fn with_safe_clearance(mut self, clearance_mm: f64) -> Self {
        self.safe_clearance_mm = clearance_mm;
        self
    }

    /// Blade radius in millimetres: the knife's floor or the thickness, whichever is larger
    pub fn radius_mm(&self) -> f64 {
        self.thickness_mm.max(self.knife.min_radius)
    }

    /// Derive engine parameters in the given unit system
    pub fn resolve(&self, units: MeasurementSystem) -> EngineParams {
        let radius = units.from_mm(self.radius_mm());
        let params = EngineParams {
            radius,
            rotation_retract: radius,
            safe_retract: units.from_mm(self.thickness_mm + self.safe_clearance_mm),
            sharp_angle: self.sharp_angle,
        };
        info!(
            "{} parameters: radius {}, rotation lift {}, travel lift {}",
            units,
            format_length(params.radius, units),
            format_length(params.rotation_retract, units),
            format_length(params.safe_retract, units)
        );
        params
    }
}
