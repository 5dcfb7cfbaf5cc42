//! Ordered include search directories.

use std::path::{Path, PathBuf};

/// Directories consulted, in order, for angle-bracket includes and as the
/// fallback for quoted includes. The first directory holding a readable
/// match wins; later matches are never looked at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SearchPath {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<P: Into<PathBuf>> Extend<P> for SearchPath {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.dirs.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for SearchPath {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.into_iter()
    }
}
