//! Drag knife models
//!
//! This module provides:
//! - Knife geometry (blade offset floor, supported material thickness)
//! - The built-in knife library
//! - Lookup of knife models by name

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ParameterError;

/// Knife model used when none is selected
pub const DEFAULT_KNIFE: &str = "D4";

/// Geometry of one drag knife model, lengths in millimetres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnifeSpec {
    /// Model name (e.g. "D4")
    pub name: String,
    /// Smallest effective blade offset of the tool
    pub min_radius: f64,
    /// Thickest material the blade can cut through
    pub max_thickness: f64,
}

impl KnifeSpec {
    pub fn new(name: impl Into<String>, min_radius: f64, max_thickness: f64) -> Self {
        Self {
            name: name.into(),
            min_radius,
            max_thickness,
        }
    }

    /// Whether the blade is long enough for the given thickness
    pub fn supports_thickness(&self, thickness_mm: f64) -> bool {
        thickness_mm <= self.max_thickness
    }
}

/// Library of known knife models
#[derive(Debug, Clone)]
pub struct KnifeLibrary {
    knives: HashMap<String, KnifeSpec>,
}

impl KnifeLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self {
            knives: HashMap::new(),
        }
    }

    /// Library pre-populated with the standard D1..D4 models
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.insert(KnifeSpec::new("D1", 1.6, 1.6));
        library.insert(KnifeSpec::new("D2", 3.1, 6.3));
        library.insert(KnifeSpec::new("D3", 1.6, 1.6));
        library.insert(KnifeSpec::new("D4", 3.1, 6.3));
        library
    }

    /// Add or replace a knife model (names are case-insensitive)
    pub fn insert(&mut self, knife: KnifeSpec) {
        self.knives.insert(knife.name.to_uppercase(), knife);
    }

    /// Look up a knife model by name
    pub fn get(&self, name: &str) -> Result<&KnifeSpec, ParameterError> {
        self.knives
            .get(&name.to_uppercase())
            .ok_or_else(|| ParameterError::UnknownKnife {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Sorted model names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.knives.values().map(|k| k.name.clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.knives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knives.is_empty()
    }
}

impl Default for KnifeLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
