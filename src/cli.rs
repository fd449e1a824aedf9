//! Command line interface

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dragknife_core::MeasurementSystem;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Post-process G-code for a drag knife
///
/// Lifts the blade for travel moves, rotates it in place at sharp corners
/// and drops moves too short for the blade to follow.
#[derive(Debug, Clone, Parser)]
#[command(name = "dragknife", version, long_version = LONG_VERSION)]
pub struct Cli {
    /// G-code file to process
    pub input: PathBuf,

    /// Output file [default: INPUT with `_knife` added to its name]
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Material thickness
    #[arg(short, long)]
    pub thickness: f64,

    /// Unit of the thickness value (metric or imperial)
    #[arg(long, value_name = "UNITS")]
    pub thickness_units: Option<MeasurementSystem>,

    /// Knife model (D1, D2, D3, D4 or one from the config file)
    #[arg(short, long)]
    pub knife: Option<String>,

    /// Turns deviating more than this many degrees from straight are sharp (10-90)
    #[arg(short = 'a', long = "angle", value_name = "DEGREES")]
    pub sharp_angle: Option<u32>,

    /// Never raise the blade: drop every height move (debugging aid)
    #[arg(long, alias = "nr")]
    pub never_raise: bool,

    /// Log level
    #[arg(short, long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Configuration file [default: <config dir>/dragknife/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Diagnostic verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Parse a level name from the configuration file
    pub fn from_name(name: &str) -> Result<Self, String> {
        <Self as ValueEnum>::from_str(name, true)
    }

    /// Most verbose tracing level shown; critical has no tracing equivalent above ERROR
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            Self::Critical | Self::Error => tracing::Level::ERROR,
            Self::Warning => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
        }
    }
}
