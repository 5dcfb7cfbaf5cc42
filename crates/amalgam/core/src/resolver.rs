//! Include target lookup.
//!
//! Quoted targets are tried next to the including file first and only then
//! against the search path; a local match shadows every search directory.
//! Angle-bracket targets only ever consult the search path.
//!
//! A candidate "exists" when it can be opened for reading. Permission errors
//! and missing files are treated the same way.

use crate::directive::{IncludeDirective, IncludeKind};
use crate::search_path::SearchPath;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Resolves include directives against an includer and a search path.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    search_path: &'a SearchPath,
}

impl<'a> Resolver<'a> {
    pub fn new(search_path: &'a SearchPath) -> Self {
        Self { search_path }
    }

    /// Returns the file `directive` refers to when it appears in `includer`,
    /// or `None` if no candidate is readable.
    pub fn resolve(&self, directive: &IncludeDirective, includer: &Path) -> Option<PathBuf> {
        if directive.kind == IncludeKind::Quoted {
            let local = includer
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(&directive.target);
            if is_readable(&local) {
                return Some(local);
            }
        }

        self.search_path
            .iter()
            .map(|dir| dir.join(&directive.target))
            .find(|candidate| is_readable(candidate))
    }
}

/// Probe a candidate by opening it. The handle is dropped immediately.
///
/// Directories open successfully on some platforms but can never be read as
/// a source file, so they do not count as a match.
fn is_readable(candidate: &Path) -> bool {
    let readable = File::open(candidate)
        .and_then(|f| f.metadata())
        .is_ok_and(|meta| !meta.is_dir());
    tracing::trace!(candidate = %candidate.display(), readable, "probe include candidate");
    readable
}
