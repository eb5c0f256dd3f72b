//! Emitter configuration loading from YAML files
//!
//! Controls the import paths and output layout of generated modules, so the
//! catalogue shape is adjustable without touching code.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Emitter configuration
///
/// All fields have defaults matching the standard catalogue layout:
/// `cf/<service>/<service>-<resource>.ts`, importing `Intrinsic` from
/// `../intrinsic/index.js` and `ResourceAttributes` from
/// `../attributes/index.js`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmitterConfig {
    /// Root directory for generated modules, below the output directory
    #[serde(default = "default_out_root")]
    pub out_root: String,

    /// Import specifier for the shared `Intrinsic` marker type
    #[serde(default = "default_intrinsic_import")]
    pub intrinsic_import: String,

    /// Import specifier for the shared `ResourceAttributes` interface
    #[serde(default = "default_attributes_import")]
    pub attributes_import: String,

    /// Whether to write the shared intrinsic/attributes support modules
    #[serde(default = "default_true")]
    pub emit_support_modules: bool,
}

fn default_out_root() -> String {
    "cf".to_string()
}

fn default_intrinsic_import() -> String {
    "../intrinsic/index.js".to_string()
}

fn default_attributes_import() -> String {
    "../attributes/index.js".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            out_root: default_out_root(),
            intrinsic_import: default_intrinsic_import(),
            attributes_import: default_attributes_import(),
            emit_support_modules: true,
        }
    }
}

impl EmitterConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::SchemaParse(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            GeneratorError::SchemaParse(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }
}
