//! Include directive recognition.
//!
//! A line is a directive only when it matches one of two whole-line shapes:
//!
//! - `#include "target"` ([`IncludeKind::Quoted`])
//! - `#include <target>` ([`IncludeKind::AngleBracket`])
//!
//! Whitespace is allowed before `#`, between `#` and `include`, between
//! `include` and the opening delimiter, and after the closing delimiter.
//! Anything else on the line turns it back into plain text.

use regex::bytes::Regex;
use std::path::Path;

// Byte-oriented so that non-UTF-8 lines pass through untouched.
const QUOTED_PATTERN: &str = r#"(?-u)^\s*#\s*include\s*"([^"]+)"\s*$"#;
const ANGLE_PATTERN: &str = r"(?-u)^\s*#\s*include\s*<([^>]+)>\s*$";

/// How the include target should be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeKind {
    /// `#include "x"`: includer's directory first, then the search path.
    Quoted,
    /// `#include <x>`: search path only.
    AngleBracket,
}

/// A parsed include directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncludeDirective {
    pub kind: IncludeKind,
    pub target: String,
}

impl IncludeDirective {
    pub fn quoted(target: impl Into<String>) -> Self {
        Self {
            kind: IncludeKind::Quoted,
            target: target.into(),
        }
    }

    pub fn angle(target: impl Into<String>) -> Self {
        Self {
            kind: IncludeKind::AngleBracket,
            target: target.into(),
        }
    }

    /// Last path component of the target, as shown in diagnostics.
    pub fn file_name(&self) -> String {
        Path::new(&self.target)
            .file_name()
            .map_or_else(|| self.target.clone(), |n| n.to_string_lossy().into_owned())
    }
}

/// Classification of a single source line (without its newline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Plain(&'a [u8]),
    Include(IncludeDirective),
}

/// Compiled directive patterns, built once per expansion run.
#[derive(Debug, Clone)]
pub struct DirectiveParser {
    quoted: Regex,
    angle: Regex,
}

impl DirectiveParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            quoted: Regex::new(QUOTED_PATTERN)?,
            angle: Regex::new(ANGLE_PATTERN)?,
        })
    }

    /// Parse `line` as a directive. The quoted form is tried first.
    pub fn parse(&self, line: &[u8]) -> Option<IncludeDirective> {
        if let Some(target) = capture_target(&self.quoted, line) {
            return Some(IncludeDirective::quoted(target));
        }
        capture_target(&self.angle, line).map(IncludeDirective::angle)
    }

    pub fn classify<'a>(&self, line: &'a [u8]) -> Line<'a> {
        match self.parse(line) {
            Some(directive) => Line::Include(directive),
            None => Line::Plain(line),
        }
    }
}

fn capture_target(re: &Regex, line: &[u8]) -> Option<String> {
    let caps = re.captures(line)?;
    let target = caps.get(1)?;
    Some(String::from_utf8_lossy(target.as_bytes()).into_owned())
}
