//! Configuration types for amalgam.
//!
//! The root type is [`AmalgamConfig`], with one sub-config for include
//! lookup and one for logging.

use amalgam_core::{DEFAULT_MAX_DEPTH, ExpandOptions, SearchPath};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration, loaded from `amalgam.json` files.
///
/// All fields use `#[serde(default)]` so partial configs work correctly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AmalgamConfig {
    /// Optional JSON Schema URL for IDE autocomplete support.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Include lookup settings.
    pub include: IncludeConfig,

    /// Logging and diagnostics configuration.
    pub logging: LoggingConfig,
}

/// Include lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IncludeConfig {
    /// Directories searched, in order, after any given on the command line.
    pub search_paths: Vec<PathBuf>,

    /// Maximum include nesting before expansion fails.
    pub max_depth: usize,
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl IncludeConfig {
    pub fn search_path(&self) -> SearchPath {
        self.search_paths.iter().cloned().collect()
    }

    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            max_depth: self.max_depth,
        }
    }
}

/// Logging and diagnostics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}
