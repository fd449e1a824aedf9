//! Error handling for dragknife
//!
//! Provides error types for every layer of the post-processor:
//! - Geometry errors (contract violations in the primitives)
//! - Parameter errors (invalid knife/material/angle configuration)
//! - G-Code errors (malformed words on an input line)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by the geometric primitives when they are called outside their
/// contract. These abort the document being processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A shift was requested along a segment of zero length
    #[error("Degenerate segment at ({x}, {y}): direction is undefined")]
    DegenerateSegment {
        /// X coordinate of the collapsed segment.
        x: f64,
        /// Y coordinate of the collapsed segment.
        y: f64,
    },
}

/// Parameter error type
///
/// Represents invalid compensation parameters supplied by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Sharp angle threshold outside the accepted band
    #[error("Sharp angle {angle} out of range (valid: {min}..={max} degrees)")]
    SharpAngleOutOfRange {
        /// The rejected angle in degrees.
        angle: u32,
        /// Smallest accepted angle.
        min: u32,
        /// Largest accepted angle.
        max: u32,
    },

    /// Rotation radius must be strictly positive
    #[error("Rotation radius must be positive, got {radius}")]
    NonPositiveRadius {
        /// The rejected radius.
        radius: f64,
    },

    /// A retract height is negative
    #[error("Retract '{name}' must not be negative, got {value}")]
    NegativeRetract {
        /// Which retract was rejected.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Material thickness is not a usable number
    #[error("Material thickness must be positive, got {thickness}")]
    InvalidThickness {
        /// The rejected thickness.
        thickness: f64,
    },

    /// Knife model is not in the library
    #[error("Unknown knife model '{name}' (available: {available})")]
    UnknownKnife {
        /// The requested model name.
        name: String,
        /// Comma separated list of known models.
        available: String,
    },
}

/// G-Code error type
///
/// Represents problems found while tokenizing a line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// A word letter is not followed by a number
    #[error("Malformed word '{word}': {reason}")]
    MalformedWord {
        /// The offending word text.
        word: String,
        /// Why it could not be parsed.
        reason: String,
    },

    /// A units word other than G20/G21
    #[error("Unknown units mode: G{value}")]
    UnknownUnits {
        /// The G number that was requested.
        value: u32,
    },
}

/// Main error type for dragknife
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Parameter error
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error is a caller contract violation
    ///
    /// Contract violations mean the caller supplied invalid parameters;
    /// retrying with the same input cannot succeed.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::Geometry(_) | Error::Parameter(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::SharpAngleOutOfRange {
            angle: 95,
            min: 10,
            max: 90,
        };
        assert_eq!(
            err.to_string(),
            "Sharp angle 95 out of range (valid: 10..=90 degrees)"
        );

        let err = ParameterError::UnknownKnife {
            name: "D9".to_string(),
            available: "D1, D2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown knife model 'D9' (available: D1, D2)"
        );
    }

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::DegenerateSegment { x: 1.5, y: -2.0 };
        assert_eq!(
            err.to_string(),
            "Degenerate segment at (1.5, -2): direction is undefined"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = GeometryError::DegenerateSegment { x: 0.0, y: 0.0 }.into();
        assert!(err.is_contract_violation());

        let err: Error = ParameterError::NonPositiveRadius { radius: 0.0 }.into();
        assert!(err.is_contract_violation());

        let err: Error = GcodeError::UnknownUnits { value: 22 }.into();
        assert!(!err.is_contract_violation());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_contract_violation());
    }
}
