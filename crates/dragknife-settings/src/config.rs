//! Configuration file for dragknife
//!
//! An optional TOML file supplies processing defaults and extra knife models:
//!
//! ```toml
//! [defaults]
//! knife = "D4"
//! sharp_angle = 20
//! safe_clearance = 10.0
//! thickness_units = "metric"
//! log_level = "warning"
//! never_raise = false
//!
//! [[knives]]
//! name = "D5"
//! min_radius = 2.0
//! max_thickness = 4.0
//! ```
//!
//! Every key is optional. Values given on the command line win over the file.

use std::path::{Path, PathBuf};

use dragknife_core::{KnifeLibrary, KnifeSpec, MeasurementSystem, DEFAULT_KNIFE};
use dragknife_gcode::{
    DEFAULT_SAFE_CLEARANCE_MM, DEFAULT_SHARP_ANGLE, MAX_SHARP_ANGLE, MIN_SHARP_ANGLE,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// File name looked up in the platform configuration directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Accepted log level names, most severe first
pub const LOG_LEVELS: [&str; 5] = ["critical", "error", "warning", "info", "debug"];

/// Log level used when neither the file nor the command line sets one
pub const DEFAULT_LOG_LEVEL: &str = "warning";

/// Defaults applied to every run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingDefaults {
    /// Knife model name
    pub knife: String,
    /// Sharp corner threshold in degrees
    pub sharp_angle: u32,
    /// Millimetres added to the material thickness for travel lifts
    pub safe_clearance: f64,
    /// Unit of the thickness given on the command line
    pub thickness_units: MeasurementSystem,
    pub log_level: String,
    /// Drop every height move from the output
    pub never_raise: bool,
}

impl Default for ProcessingDefaults {
    fn default() -> Self {
        Self {
            knife: DEFAULT_KNIFE.to_string(),
            sharp_angle: DEFAULT_SHARP_ANGLE,
            safe_clearance: DEFAULT_SAFE_CLEARANCE_MM,
            thickness_units: MeasurementSystem::Metric,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            never_raise: false,
        }
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: ProcessingDefaults,
    /// Custom knife models, added to (or replacing) the built-in ones
    pub knives: Vec<KnifeSpec>,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Platform location of the configuration file
    ///
    /// `~/.config/dragknife/config.toml` on Linux, the equivalent
    /// application-support directory elsewhere.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dragknife").join(CONFIG_FILE_NAME))
    }

    /// Load the explicit file, else the default file if present, else defaults
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load_or_default(explicit: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No configuration file, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let defaults = &self.defaults;
        if !(MIN_SHARP_ANGLE..=MAX_SHARP_ANGLE).contains(&defaults.sharp_angle) {
            return Err(SettingsError::invalid(
                "defaults.sharp_angle",
                format!(
                    "{} is outside {}..={} degrees",
                    defaults.sharp_angle, MIN_SHARP_ANGLE, MAX_SHARP_ANGLE
                ),
            ));
        }
        if !(defaults.safe_clearance.is_finite() && defaults.safe_clearance >= 0.0) {
            return Err(SettingsError::invalid(
                "defaults.safe_clearance",
                "must be a non-negative length",
            ));
        }
        if !LOG_LEVELS.contains(&defaults.log_level.to_lowercase().as_str()) {
            return Err(SettingsError::invalid(
                "defaults.log_level",
                format!("expected one of {}", LOG_LEVELS.join(", ")),
            ));
        }

        for (i, knife) in self.knives.iter().enumerate() {
            let key = format!("knives[{}]", i);
            if knife.name.trim().is_empty() {
                return Err(SettingsError::invalid(key, "name must not be empty"));
            }
            if !(knife.min_radius.is_finite() && knife.min_radius > 0.0) {
                return Err(SettingsError::invalid(
                    format!("{}.min_radius", key),
                    "must be > 0",
                ));
            }
            if !(knife.max_thickness.is_finite() && knife.max_thickness > 0.0) {
                return Err(SettingsError::invalid(
                    format!("{}.max_thickness", key),
                    "must be > 0",
                ));
            }
        }

        self.knife_library()
            .get(&defaults.knife)
            .map_err(|e| SettingsError::invalid("defaults.knife", e.to_string()))?;
        Ok(())
    }

    /// Built-in knife models merged with the configured ones
    pub fn knife_library(&self) -> KnifeLibrary {
        let mut library = KnifeLibrary::builtin();
        for knife in &self.knives {
            library.insert(knife.clone());
        }
        library
    }
}
