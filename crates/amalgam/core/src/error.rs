//! Error type for include expansion.

use crate::location::SourceLocation;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`PreprocessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input could not be opened or the output could not be created.
    SetupFailure,
    /// An include directive named a file that could not be found.
    UnresolvedInclude,
    /// Include nesting exceeded the configured depth limit.
    CycleOrDepthExceeded,
    /// The output sink failed while writing.
    Io,
    /// The directive patterns failed to compile.
    Internal,
}

/// Error returned by [`crate::preprocess`] and the expander.
///
/// Every variant is fatal to the call that produced it. Output written before
/// the failure is left in place.
#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("cannot open input file {}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output file {}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "unknown include file {name} at file {} at line {}",
        .origin.file.display(),
        .origin.line
    )]
    UnresolvedInclude {
        /// File name of the include target (directory components dropped).
        name: String,
        /// The directive that failed.
        origin: SourceLocation,
        /// Include sites leading to `origin.file`, outermost first.
        chain: Vec<SourceLocation>,
    },

    #[error(
        "include depth limit of {limit} exceeded by {name} at file {} at line {} (include cycle?)",
        .origin.file.display(),
        .origin.line
    )]
    DepthExceeded {
        limit: usize,
        name: String,
        origin: SourceLocation,
        chain: Vec<SourceLocation>,
    },

    #[error("failed to write expanded output")]
    Write(#[source] io::Error),

    #[error("invalid include directive pattern")]
    Pattern(#[from] regex::Error),
}

impl PreprocessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OpenInput { .. } | Self::CreateOutput { .. } => ErrorKind::SetupFailure,
            Self::UnresolvedInclude { .. } => ErrorKind::UnresolvedInclude,
            Self::DepthExceeded { .. } => ErrorKind::CycleOrDepthExceeded,
            Self::Write(_) => ErrorKind::Io,
            Self::Pattern(_) => ErrorKind::Internal,
        }
    }

    /// Setup failures carry no diagnostic; the caller decides how to report them.
    pub fn is_setup_failure(&self) -> bool {
        self.kind() == ErrorKind::SetupFailure
    }

    /// The operator-facing diagnostic line for resolution failures.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::UnresolvedInclude { .. } | Self::DepthExceeded { .. } => Some(self.to_string()),
            _ => None,
        }
    }

    /// The directive location a resolution failure points at.
    pub fn origin(&self) -> Option<&SourceLocation> {
        match self {
            Self::UnresolvedInclude { origin, .. } | Self::DepthExceeded { origin, .. } => {
                Some(origin)
            }
            _ => None,
        }
    }

    /// Include sites that led to the failing directive, outermost first.
    pub fn include_chain(&self) -> &[SourceLocation] {
        match self {
            Self::UnresolvedInclude { chain, .. } | Self::DepthExceeded { chain, .. } => chain,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, PreprocessError>;
