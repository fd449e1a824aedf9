//! Typed G-code words and parsed blocks

use dragknife_core::MeasurementSystem;
use std::fmt;

/// Motion mode selected by a motion-group G word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionCode {
    /// G0 - tool-up travel
    Rapid,
    /// G1 - cutting move
    Linear,
    /// G2 - clockwise arc
    ArcCw,
    /// G3 - counter-clockwise arc
    ArcCcw,
    /// Motion-group code the engine does not support (canned cycles, probing, splines)
    Unknown(String),
}

impl fmt::Display for MotionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rapid => write!(f, "G0"),
            Self::Linear => write!(f, "G1"),
            Self::ArcCw => write!(f, "G2"),
            Self::ArcCcw => write!(f, "G3"),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Meaning of a G word for the post-processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GWord {
    /// Selects a motion mode
    Motion(MotionCode),
    /// G20/G21
    Units(MeasurementSystem),
    /// G80 - cancel modal motion
    CancelMotion,
    /// Non-modal commands whose axis words are not tool positions (G4, G10, G28, G30, G53, G92)
    NonMotion,
    /// Anything else (plane, distance mode, work offsets, ...)
    Other,
}

impl GWord {
    /// Classify the number following a `G` letter
    ///
    /// `text` is the number as written, used to name unsupported codes.
    pub fn classify(number: f64, text: &str) -> Self {
        if number < 0.0 {
            return Self::Other;
        }
        let whole = number.trunc() as u32;
        let tenths = ((number - number.trunc()) * 10.0).round() as u32;

        match (whole, tenths) {
            (0, 0) => Self::Motion(MotionCode::Rapid),
            (1, 0) => Self::Motion(MotionCode::Linear),
            (2, 0) => Self::Motion(MotionCode::ArcCw),
            (3, 0) => Self::Motion(MotionCode::ArcCcw),
            (20, 0) | (21, 0) => {
                MeasurementSystem::from_gcode(whole).map_or(Self::Other, Self::Units)
            }
            (80, 0) => Self::CancelMotion,
            (4, 0) | (10, _) | (28, _) | (30, _) | (53, 0) | (92, _) => Self::NonMotion,
            (5, _) | (33, 0) | (38, _) | (73, 0) | (76, 0) | (81..=89, 0) => {
                Self::Motion(MotionCode::Unknown(format!("G{}", text)))
            }
            _ => Self::Other,
        }
    }
}

/// Structured record of one line's command words
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    /// Motion mode word on this line, if any
    pub motion: Option<MotionCode>,
    /// Units word on this line, if any
    pub units: Option<MeasurementSystem>,
    /// G80 present
    pub cancel_motion: bool,
    /// A non-motion command owns the axis words
    pub non_motion: bool,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    /// F or S word present
    pub has_feed_or_speed: bool,
}

impl Block {
    pub fn has_axis_words(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.z.is_some()
    }
}
