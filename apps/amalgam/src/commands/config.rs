//! Configuration management commands.
//!
//! Provides init, show, schema, and validate subcommands for managing
//! amalgam.json configuration files.

use amalgam_config::{
    AmalgamConfig,
    loader::{global_config_path, load_merged, local_config_path},
    writer::write_pretty_json_atomic,
};
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init {
        /// Create global config instead of local
        #[arg(long)]
        global: bool,

        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the merged configuration
    Show {
        /// Output as raw JSON (no formatting)
        #[arg(long)]
        json: bool,

        /// Path to use as local directory (defaults to current dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Output the JSON Schema for amalgam.json
    Schema,

    /// Validate configuration and show warnings
    Validate {
        /// Path to use as local directory (defaults to current dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn execute(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { global, force } => cmd_init(global, force),
        ConfigCommands::Show { json, path } => cmd_show(json, path),
        ConfigCommands::Schema => cmd_schema(),
        ConfigCommands::Validate { path } => cmd_validate(path),
    }
}

fn local_dir(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p),
        None => Ok(std::env::current_dir()?),
    }
}

fn cmd_init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        global_config_path()?
    } else {
        local_config_path(&std::env::current_dir()?)
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}\nUse --force to overwrite",
            path.display()
        );
    }

    let value = serde_json::to_value(AmalgamConfig::default())?;
    write_pretty_json_atomic(&path, &value)?;

    println!(
        "{} Created {}",
        "OK".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

fn cmd_show(json_output: bool, path: Option<PathBuf>) -> Result<()> {
    let loaded = load_merged(&local_dir(path)?)?;
    for warning in &loaded.warnings {
        eprintln!("{} {warning}", "WARN".yellow());
    }

    let rendered = if json_output {
        serde_json::to_string(&loaded.config)?
    } else {
        serde_json::to_string_pretty(&loaded.config)?
    };
    println!("{rendered}");
    Ok(())
}

fn cmd_schema() -> Result<()> {
    println!("{}", amalgam_config::schema_json_pretty()?);
    Ok(())
}

/// Print the effective search path with each directory's status, then any
/// warnings. Warnings never fail the command.
fn cmd_validate(path: Option<PathBuf>) -> Result<()> {
    let loaded = load_merged(&local_dir(path)?)?;
    let include = &loaded.config.include;

    println!("Search path ({} dirs):", include.search_paths.len());
    for dir in &include.search_paths {
        let status = if dir.is_dir() {
            "found".green()
        } else {
            "missing".red()
        };
        println!("  [{status}] {}", dir.display());
    }
    let options = include.expand_options();
    println!(
        "Depth limit: {} (effective {})",
        include.max_depth,
        options.effective_max_depth()
    );
    println!("Log level: {}", loaded.config.logging.level);

    match loaded.warnings.len() {
        0 => println!("{} Configuration is valid", "OK".green()),
        n => {
            println!("{} {n} warning(s):", "WARN".yellow());
            for warning in &loaded.warnings {
                println!("  - {warning}");
            }
        }
    }

    println!(
        "Read from {} and {}",
        loaded.paths.global.display(),
        loaded.paths.local.display()
    );
    Ok(())
}
