//! # dragknife G-code processing
//!
//! Post-processes a G-code stream for a drag knife:
//!
//! 1. **line** - splits lines into raw text and command code, tokenizes words
//! 2. **command** - typed motion codes and parsed blocks
//! 3. **params** - resolves blade radius and lift heights per unit system
//! 4. **engine** - the motion compensation state machine
//! 5. **emit** / **filter** - generated commands and the never-raise filter
//! 6. **driver** - runs a whole stream, restarting the engine on unit switches

pub mod command;
pub mod driver;
pub mod emit;
pub mod engine;
pub mod filter;
pub mod line;
pub mod params;

pub use command::{Block, GWord, MotionCode};
pub use driver::{transform_str, RunSummary, StreamDriver};
pub use emit::{OutputOp, HEIGHT_MOVE_PREFIX};
pub use engine::{EngineStats, MotionEngine, WINDOW_CAPACITY};
pub use filter::OutputFilter;
pub use line::{classify, parse_block, ClassifiedLine};
pub use params::{
    EngineParams, MaterialSetup, DEFAULT_SAFE_CLEARANCE_MM, DEFAULT_SHARP_ANGLE, MAX_SHARP_ANGLE,
    MIN_SHARP_ANGLE,
};
