//! Layered configuration for the `amalgam` include flattener.
//!
//! This crate provides:
//! - [`AmalgamConfig`]: search directories, depth limit and log level
//! - [`load_merged`]: two-layer loading (global + local) with env overrides
//! - [`schema`]: JSON Schema generation for editor completion
//! - [`validation`]: advisory checks that produce warnings, never errors
//!
//! # Configuration Precedence (lowest to highest)
//! 1. Default values
//! 2. Global config (`~/.config/amalgam/amalgam.json`)
//! 3. Local config (`./amalgam.json`)
//! 4. Environment variables
//!
//! # Example
//! ```no_run
//! use amalgam_config::load_merged;
//! use std::path::Path;
//!
//! let loaded = load_merged(Path::new(".")).unwrap();
//! let search_path = loaded.config.include.search_path();
//! println!("{} search directories", search_path.len());
//!
//! for warning in &loaded.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! ```
//!
//! # Environment Variables
//! - `AMALGAM_INCLUDE_PATH`: Replace the search directories (platform path-list syntax)
//! - `AMALGAM_MAX_DEPTH`: Override the include depth limit
//! - `AMALGAM_LOG_LEVEL`: Override log level

pub mod loader;
pub mod merge;
pub mod schema;
pub mod types;
pub mod validation;
pub mod writer;

pub use loader::{LoadedAmalgamConfig, load_merged};
pub use schema::schema_json_pretty;
pub use types::AmalgamConfig;
