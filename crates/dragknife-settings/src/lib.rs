//! Dragknife Settings Crate
//!
//! Loads the optional TOML configuration file: processing defaults and
//! custom knife models.

pub mod config;
pub mod error;

pub use config::{Config, ProcessingDefaults, CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL, LOG_LEVELS};
pub use error::{SettingsError, SettingsResult};
