//! # dragknife
//!
//! G-code post-processor for drag knife cutters. The blade of a drag knife
//! trails its pivot by a small offset; this tool rewrites a CAM toolpath so
//! the blade is lifted for travel and swivelled in place at sharp corners.
//!
//! ## Architecture
//!
//! 1. **dragknife-core** - errors, units, geometry, knife models
//! 2. **dragknife-gcode** - line tokenizer, motion compensation engine, stream driver
//! 3. **dragknife-settings** - TOML configuration file
//! 4. **dragknife** - command line binary that wires them together

pub mod cli;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use dragknife_gcode::{MaterialSetup, OutputFilter, RunSummary, StreamDriver};
use dragknife_settings::Config;
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub use cli::{Cli, LogLevel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Suffix added to the input file name when no output is given
pub const OUTPUT_SUFFIX: &str = "_knife";

/// Initialize logging
///
/// Diagnostics go to stderr at `level`; `RUST_LOG` directives are honoured
/// on top of it.
pub fn init_logging(level: LogLevel) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(level.tracing_level().into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install the log subscriber")?;

    Ok(())
}

/// Log level from the command line, else from the configuration file
pub fn resolve_log_level(cli: &Cli, config: &Config) -> anyhow::Result<LogLevel> {
    match cli.log_level {
        Some(level) => Ok(level),
        None => LogLevel::from_name(&config.defaults.log_level).map_err(anyhow::Error::msg),
    }
}

/// `dir/name.ext` becomes `dir/name_knife.ext`
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}{}", stem, OUTPUT_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}

/// Material setup and output filter from the command line and configuration
pub fn resolve_setup(cli: &Cli, config: &Config) -> anyhow::Result<(MaterialSetup, OutputFilter)> {
    let library = config.knife_library();
    let knife_name = cli.knife.as_deref().unwrap_or(&config.defaults.knife);
    let knife = library.get(knife_name)?.clone();

    let units = cli.thickness_units.unwrap_or(config.defaults.thickness_units);
    let thickness_mm = units.to_mm(cli.thickness);
    let sharp_angle = cli.sharp_angle.unwrap_or(config.defaults.sharp_angle);

    let setup = MaterialSetup::new(thickness_mm, knife, sharp_angle)?
        .with_safe_clearance(config.defaults.safe_clearance);

    let filter = if cli.never_raise || config.defaults.never_raise {
        warn!("never-raise mode: height moves are removed from the output");
        OutputFilter::NeverRaiseBlade
    } else {
        OutputFilter::PassAll
    };
    Ok((setup, filter))
}

/// Process the input file into the output file
///
/// The output is written to a temporary file next to the destination and
/// only moved into place when the whole stream was processed.
pub fn run(cli: &Cli, config: &Config) -> anyhow::Result<RunSummary> {
    let (setup, filter) = resolve_setup(cli, config)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&cli.input));

    let input = File::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;

    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;

    let summary = {
        let writer = BufWriter::new(tmp.as_file());
        StreamDriver::new(setup, filter)?
            .run(BufReader::new(input), writer)
            .with_context(|| format!("failed to process {}", cli.input.display()))?
    };

    tmp.persist(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dragknife").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("cuts/part.nc")),
            PathBuf::from("cuts/part_knife.nc")
        );
        assert_eq!(derive_output_path(Path::new("part")), PathBuf::from("part_knife"));
        assert_eq!(
            derive_output_path(Path::new("a.b.nc")),
            PathBuf::from("a.b_knife.nc")
        );
    }

    #[test]
    fn test_resolve_log_level() {
        let cli = parse(&["x.nc", "-t", "1"]);
        let mut config = Config::default();
        assert_eq!(resolve_log_level(&cli, &config).unwrap(), LogLevel::Warning);

        config.defaults.log_level = "debug".to_string();
        assert_eq!(resolve_log_level(&cli, &config).unwrap(), LogLevel::Debug);

        let cli = parse(&["x.nc", "-t", "1", "-l", "error"]);
        assert_eq!(resolve_log_level(&cli, &config).unwrap(), LogLevel::Error);
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::default();
        config.defaults.sharp_angle = 45;
        config.defaults.knife = "D1".to_string();

        let cli = parse(&["x.nc", "-t", "1", "-a", "30"]);
        let (setup, filter) = resolve_setup(&cli, &config).unwrap();
        assert_eq!(setup.sharp_angle, 30);
        assert_eq!(setup.knife.name, "D1");
        assert_eq!(filter, OutputFilter::PassAll);
    }

    #[test]
    fn test_imperial_thickness_is_converted() {
        let cli = parse(&["x.nc", "-t", "0.5", "--thickness-units", "imperial"]);
        let (setup, _) = resolve_setup(&cli, &Config::default()).unwrap();
        assert!((setup.thickness_mm - 12.7).abs() < 1e-9);
    }
}
