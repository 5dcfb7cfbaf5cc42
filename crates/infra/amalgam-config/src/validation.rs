//! Advisory validation for AmalgamConfig.
//!
//! Validation never rejects a config. A search directory that does not exist
//! is still searched (it simply never matches), so it is reported as a
//! warning only.

use crate::types::AmalgamConfig;
use amalgam_core::MAX_DEPTH_LIMIT;
use std::collections::HashSet;

/// An advisory warning about a configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Human-readable warning message.
    pub message: String,

    /// JSON path to the problematic config field.
    pub path: &'static str,
}

impl std::fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a configuration and return advisory warnings.
pub fn validate(cfg: &AmalgamConfig) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];

    let mut seen = HashSet::new();
    for dir in &cfg.include.search_paths {
        if !dir.is_dir() {
            warnings.push(AdvisoryWarning {
                code: "include.search_paths.missing",
                path: "include.search_paths",
                message: format!("Search directory does not exist: '{}'", dir.display()),
            });
        }
        if !seen.insert(dir) {
            warnings.push(AdvisoryWarning {
                code: "include.search_paths.duplicate",
                path: "include.search_paths",
                message: format!(
                    "Search directory listed more than once: '{}'",
                    dir.display()
                ),
            });
        }
    }

    if cfg.include.max_depth == 0 {
        warnings.push(AdvisoryWarning {
            code: "include.max_depth.zero",
            path: "include.max_depth",
            message: "A depth limit of 0 rejects every include directive".into(),
        });
    }

    if cfg.include.max_depth > MAX_DEPTH_LIMIT {
        warnings.push(AdvisoryWarning {
            code: "include.max_depth.too_large",
            path: "include.max_depth",
            message: format!(
                "Depth limit {} exceeds the maximum of {MAX_DEPTH_LIMIT} and will be clamped",
                cfg.include.max_depth
            ),
        });
    }

    if !VALID_LOG_LEVELS.contains(&cfg.logging.level.to_lowercase().as_str()) {
        warnings.push(AdvisoryWarning {
            code: "logging.level.invalid",
            path: "logging.level",
            message: format!(
                "Unknown log level '{}'. Expected one of: {}",
                cfg.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    warnings
}
