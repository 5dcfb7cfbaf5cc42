//! Configuration loader with two-layer merge and env overrides.
//!
//! The loading process:
//! 1. Read global config from `~/.config/amalgam/amalgam.json`
//! 2. Read local config from `./amalgam.json`
//! 3. Deep merge at JSON Value level (RFC 7396)
//! 4. Deserialize once into typed AmalgamConfig
//! 5. Apply env var overrides (highest precedence)
//! 6. Run advisory validation

use crate::{merge::merge_patch, types::AmalgamConfig, validation::AdvisoryWarning};
use amalgam_core::MAX_DEPTH_LIMIT;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Filename for local config.
pub const LOCAL_FILE: &str = "amalgam.json";

/// Directory name under config_dir for global config.
pub const GLOBAL_DIR: &str = "amalgam";

/// Filename for global config.
pub const GLOBAL_FILE: &str = "amalgam.json";

pub const ENV_INCLUDE_PATH: &str = "AMALGAM_INCLUDE_PATH";
pub const ENV_MAX_DEPTH: &str = "AMALGAM_MAX_DEPTH";
pub const ENV_LOG_LEVEL: &str = "AMALGAM_LOG_LEVEL";

/// Resolved paths for config files.
#[derive(Debug, Clone)]
pub struct AmalgamConfigPaths {
    /// Path to local config (./amalgam.json).
    pub local: PathBuf,

    /// Path to global config (~/.config/amalgam/amalgam.json).
    pub global: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct LoadedAmalgamConfig {
    /// The loaded and merged configuration.
    pub config: AmalgamConfig,

    /// Advisory warnings from env parsing and validation.
    pub warnings: Vec<AdvisoryWarning>,

    /// Resolved config file paths.
    pub paths: AmalgamConfigPaths,
}

/// Get the global config file path.
///
/// Returns `~/.config/amalgam/amalgam.json` on Unix-like systems.
pub fn global_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config dir")?;
    Ok(base.join(GLOBAL_DIR).join(GLOBAL_FILE))
}

/// Get the local config file path for a given directory.
pub fn local_config_path(local_dir: &Path) -> PathBuf {
    local_dir.join(LOCAL_FILE)
}

/// Load and merge configuration from the global file and `local_dir`.
pub fn load_merged(local_dir: &Path) -> Result<LoadedAmalgamConfig> {
    let global_path = global_config_path()?;
    load_from_paths(&global_path, &local_config_path(local_dir))
}

/// Load and merge configuration from explicit file paths. Missing files are
/// treated as empty.
pub fn load_from_paths(global_path: &Path, local_path: &Path) -> Result<LoadedAmalgamConfig> {
    let global_v = read_json_object_or_empty(global_path)?;
    let local_v = read_json_object_or_empty(local_path)?;

    let merged = merge_patch(global_v, local_v);

    let mut cfg: AmalgamConfig =
        serde_json::from_value(merged).context("Failed to deserialize merged amalgam config")?;

    let mut warnings = apply_env_overrides(&mut cfg);
    warnings.extend(crate::validation::validate(&cfg));

    tracing::debug!(
        global = %global_path.display(),
        local = %local_path.display(),
        search_dirs = cfg.include.search_paths.len(),
        max_depth = cfg.include.max_depth,
        "loaded amalgam config"
    );

    Ok(LoadedAmalgamConfig {
        config: cfg,
        warnings,
        paths: AmalgamConfigPaths {
            local: local_path.to_path_buf(),
            global: global_path.to_path_buf(),
        },
    })
}

/// Apply environment variable overrides. Unparseable values are skipped and
/// reported as warnings.
fn apply_env_overrides(cfg: &mut AmalgamConfig) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];

    if let Some(v) = env_trimmed(ENV_INCLUDE_PATH) {
        cfg.include.search_paths = std::env::split_paths(&v)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
    }

    if let Some(v) = env_trimmed(ENV_MAX_DEPTH) {
        match v.parse::<usize>() {
            Ok(depth) if (1..=MAX_DEPTH_LIMIT).contains(&depth) => cfg.include.max_depth = depth,
            _ => warnings.push(AdvisoryWarning {
                code: "env.max_depth.invalid",
                path: "include.max_depth",
                message: format!(
                    "Ignoring {ENV_MAX_DEPTH}='{v}': expected an integer from 1 to {MAX_DEPTH_LIMIT}"
                ),
            }),
        }
    }

    if let Some(v) = env_trimmed(ENV_LOG_LEVEL) {
        cfg.logging.level = v;
    }

    warnings
}

/// Helper to read and normalize an env var (trim + filter empty).
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a JSON file as a Value, returning empty object if file doesn't exist.
fn read_json_object_or_empty(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let v: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    match v {
        Value::Object(_) => Ok(v),
        _ => anyhow::bail!("Config root must be a JSON object: {}", path.display()),
    }
}
