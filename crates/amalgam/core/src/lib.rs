//! Include-flattening engine for single-file amalgamation.
//!
//! Given an entry file and an ordered list of search directories, every
//! `#include "x"` / `#include <x>` line is replaced by the recursively
//! expanded contents of the file it names. All other lines are copied
//! verbatim. Expansion stops at the first include that cannot be resolved.
//!
//! This crate provides:
//! - [`DirectiveParser`]: whole-line recognition of the two include forms
//! - [`Resolver`]: quoted vs. angle-bracket lookup over a [`SearchPath`]
//! - [`Expander`]: depth-first, order-preserving splicing into one sink
//! - [`preprocess`] / [`preprocess_into`]: top-level entry points
//! - [`fixture`]: the reference include tree used by self-tests
//!
//! # Example
//! ```no_run
//! use amalgam_core::{ExpandOptions, SearchPath, preprocess};
//! use std::path::Path;
//!
//! let search_path: SearchPath = ["include"].into_iter().collect();
//! match preprocess(
//!     Path::new("src/main.c"),
//!     Path::new("main.amalgam.c"),
//!     &search_path,
//!     ExpandOptions::default(),
//! ) {
//!     Ok(stats) => println!("{} lines written", stats.lines_written),
//!     Err(e) => match e.diagnostic() {
//!         Some(line) => println!("{line}"),
//!         None => eprintln!("{e}"),
//!     },
//! }
//! ```

pub mod directive;
pub mod error;
pub mod expander;
pub mod fixture;
pub mod location;
pub mod preprocess;
pub mod resolver;
pub mod search_path;

pub use directive::{DirectiveParser, IncludeDirective, IncludeKind, Line};
pub use error::{ErrorKind, PreprocessError, Result};
pub use expander::{DEFAULT_MAX_DEPTH, ExpandOptions, Expander, ExpansionStats, MAX_DEPTH_LIMIT};
pub use location::SourceLocation;
pub use preprocess::{preprocess, preprocess_into};
pub use resolver::Resolver;
pub use search_path::SearchPath;
