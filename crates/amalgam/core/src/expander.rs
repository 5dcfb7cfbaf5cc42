//! Order-preserving include expansion.
//!
//! The expander walks the include graph depth-first. Plain lines are copied
//! to the sink followed by `\n`; directive lines are replaced by the full
//! expansion of the file they resolve to and never written themselves.
//! Every nested expansion writes through the same sink, so output order is
//! exactly the pre-order walk.
//!
//! Open files live on an explicit frame stack rather than the call stack, so
//! nesting depth is bounded by [`ExpandOptions::max_depth`] alone. Each file
//! is read completely when it is entered; only the sink stays open across
//! nested includes.

use crate::directive::{DirectiveParser, IncludeDirective};
use crate::error::{PreprocessError, Result};
use crate::location::SourceLocation;
use crate::resolver::Resolver;
use crate::search_path::SearchPath;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Include nesting allowed before expansion gives up with
/// [`PreprocessError::DepthExceeded`].
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Hard ceiling on [`ExpandOptions::max_depth`]. Larger values are clamped.
pub const MAX_DEPTH_LIMIT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Maximum number of nested includes below the entry file, clamped to
    /// [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl ExpandOptions {
    /// The depth limit actually enforced.
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Counters collected over one successful expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Files read, counting repeated includes of the same file.
    pub files_expanded: usize,
    /// Lines written to the sink.
    pub lines_written: usize,
    /// Deepest include nesting seen (0 when nothing was included).
    pub max_depth_reached: usize,
}

/// A file being expanded: its content and how far it has been consumed.
struct Frame {
    file: PathBuf,
    content: Vec<u8>,
    offset: usize,
    line: usize,
}

impl Frame {
    fn new(file: PathBuf, content: Vec<u8>) -> Self {
        Self {
            file,
            content,
            offset: 0,
            line: 0,
        }
    }

    /// Byte range of the next line (without its `\n`) and its 1-based number.
    fn next_line(&mut self) -> Option<(Range<usize>, usize)> {
        if self.offset >= self.content.len() {
            return None;
        }
        let start = self.offset;
        let end = self.content[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.content.len(), |i| start + i);
        self.offset = end + 1;
        self.line += 1;
        Some((start..end, self.line))
    }
}

/// Drives one expansion into a borrowed sink.
pub struct Expander<'a, W: Write> {
    parser: DirectiveParser,
    resolver: Resolver<'a>,
    max_depth: usize,
    out: &'a mut W,
    frames: Vec<Frame>,
    // Include sites of every frame but the entry, outermost first.
    stack: Vec<SourceLocation>,
    stats: ExpansionStats,
}

impl<'a, W: Write> Expander<'a, W> {
    pub fn new(search_path: &'a SearchPath, options: ExpandOptions, out: &'a mut W) -> Result<Self> {
        let max_depth = options.effective_max_depth();
        if max_depth < options.max_depth {
            tracing::debug!(
                requested = options.max_depth,
                limit = max_depth,
                "clamping include depth limit"
            );
        }
        Ok(Self {
            parser: DirectiveParser::new()?,
            resolver: Resolver::new(search_path),
            max_depth,
            out,
            frames: Vec::new(),
            stack: Vec::new(),
            stats: ExpansionStats::default(),
        })
    }

    /// Expand `entry` and everything it includes into the sink.
    ///
    /// If `entry` itself cannot be read the error is
    /// [`PreprocessError::OpenInput`] and nothing is written.
    pub fn expand(mut self, entry: &Path) -> Result<ExpansionStats> {
        let content = std::fs::read(entry).map_err(|source| PreprocessError::OpenInput {
            path: entry.to_path_buf(),
            source,
        })?;
        self.enter(entry.to_path_buf(), content);

        while let Some(frame) = self.frames.last_mut() {
            let Some((range, line)) = frame.next_line() else {
                self.frames.pop();
                self.stack.pop();
                continue;
            };
            let text = &frame.content[range];
            match self.parser.parse(text) {
                None => write_line(self.out, &mut self.stats, text)?,
                Some(directive) => {
                    let site = SourceLocation::new(&frame.file, line);
                    self.include(&directive, site)?;
                }
            }
        }

        Ok(self.stats)
    }

    fn enter(&mut self, file: PathBuf, content: Vec<u8>) {
        self.stats.files_expanded += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(self.stack.len());
        self.frames.push(Frame::new(file, content));
    }

    fn include(&mut self, directive: &IncludeDirective, site: SourceLocation) -> Result<()> {
        let Some(resolved) = self.resolver.resolve(directive, &site.file) else {
            tracing::debug!(
                target_file = %directive.target,
                kind = ?directive.kind,
                at = %site,
                "include not found"
            );
            return Err(PreprocessError::UnresolvedInclude {
                name: directive.file_name(),
                origin: site,
                chain: self.stack.clone(),
            });
        };

        if self.stack.len() >= self.max_depth {
            return Err(PreprocessError::DepthExceeded {
                limit: self.max_depth,
                name: directive.file_name(),
                origin: site,
                chain: self.stack.clone(),
            });
        }

        // A file that resolved but cannot be read is reported at the
        // directive that named it.
        let content = match std::fs::read(&resolved) {
            Ok(content) => content,
            Err(error) => {
                tracing::debug!(file = %resolved.display(), %error, "resolved include is unreadable");
                return Err(PreprocessError::UnresolvedInclude {
                    name: resolved.file_name().map_or_else(
                        || resolved.display().to_string(),
                        |n| n.to_string_lossy().into_owned(),
                    ),
                    origin: site,
                    chain: self.stack.clone(),
                });
            }
        };

        tracing::debug!(
            kind = ?directive.kind,
            target_file = %directive.target,
            resolved = %resolved.display(),
            depth = self.stack.len() + 1,
            at = %site,
            "expanding include"
        );

        self.stack.push(site);
        self.enter(resolved, content);
        Ok(())
    }
}

fn write_line<W: Write>(out: &mut W, stats: &mut ExpansionStats, text: &[u8]) -> Result<()> {
    out.write_all(text)
        .and_then(|()| out.write_all(b"\n"))
        .map_err(PreprocessError::Write)?;
    stats.lines_written += 1;
    Ok(())
}
