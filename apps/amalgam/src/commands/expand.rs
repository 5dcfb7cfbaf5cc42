//! `amalgam expand`: flatten one entry file into one output file.

use crate::logging;
use amalgam_config::load_merged;
use amalgam_core::{MAX_DEPTH_LIMIT, PreprocessError, SearchPath, preprocess};
use anyhow::Result;
use clap::Args;
use clap::builder::RangedU64ValueParser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args)]
pub struct ExpandArgs {
    /// Entry file to expand
    pub input: PathBuf,

    /// Output file (created or truncated)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Search directory for includes; repeatable, searched before configured ones
    #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Maximum include nesting depth (at most 10000)
    #[arg(long, value_parser = max_depth_parser())]
    pub max_depth: Option<usize>,

    /// Directory holding the local amalgam.json (defaults to current dir)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

pub fn execute(args: ExpandArgs, verbose: u8, quiet: bool) -> Result<ExitCode> {
    let dir = match args.path {
        Some(p) => p,
        None => std::env::current_dir()?,
    };
    let loaded = load_merged(&dir)?;
    logging::init(verbose, Some(&loaded.config.logging.level));

    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }

    let mut search_path: SearchPath = args.include_dirs.into_iter().collect();
    search_path.extend(loaded.config.include.search_path());
    let mut options = loaded.config.include.expand_options();
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }

    match preprocess(&args.input, &args.output, &search_path, options) {
        Ok(stats) => {
            if !quiet {
                eprintln!(
                    "{} Wrote {} ({} files, {} lines, depth {})",
                    "OK".green(),
                    args.output.display().to_string().cyan(),
                    stats.files_expanded,
                    stats.lines_written,
                    stats.max_depth_reached
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report_failure(&err, verbose);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn max_depth_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(0..=MAX_DEPTH_LIMIT as u64)
}

/// Resolution failures print their diagnostic on stdout; everything else is
/// an error on stderr.
fn report_failure(err: &PreprocessError, verbose: u8) {
    let Some(diagnostic) = err.diagnostic() else {
        eprintln!("{} {}", "ERROR".red(), error_chain(err));
        return;
    };

    println!("{diagnostic}");
    if verbose > 0 {
        for site in err.include_chain().iter().rev() {
            eprintln!("  included from {site}");
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
