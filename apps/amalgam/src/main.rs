//! Amalgam CLI.
//!
//! The `amalgam` command flattens a tree of `#include` directives into a
//! single output file, and manages the `amalgam.json` configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "amalgam")]
#[command(about = "Flatten #include trees into a single source file")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress the success summary
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand an entry file and everything it includes into one output file
    Expand(commands::expand::ExpandArgs),

    /// Expand the built-in reference tree and check the result
    SelfTest {
        /// Build the reference tree here instead of in a temporary directory
        #[arg(long)]
        dir: Option<std::path::PathBuf>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand(args) => commands::expand::execute(args, cli.verbose, cli.quiet),
        Commands::SelfTest { dir } => {
            logging::init(cli.verbose, None);
            commands::self_test::execute(dir.as_deref(), cli.quiet)
        }
        Commands::Config { command } => {
            logging::init(cli.verbose, None);
            commands::config::execute(command)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
