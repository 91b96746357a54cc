use ignore::{Walk, WalkBuilder};
use log::{debug, trace};
use std::path::{Component, Path, PathBuf};

use crate::{
    constants::{DEFAULT_EXCLUDES, PYTHON_EXTENSIONS},
    error::{Error, Result},
    types::SourceFile,
};

/// Decides whether a discovered path is left out of a scan.
pub trait PathFilter: Send + Sync {
    fn excludes(&self, path: &Path) -> bool;
}

impl<F> PathFilter for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn excludes(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Excludes a path when its string form contains any needle.
///
/// Matching is case-sensitive and looks at the whole walked path, root prefix
/// included, so `src/contest/a.py` is excluded by the `test` needle.
#[derive(Debug, Clone)]
pub struct SubstringFilter {
    needles: Vec<String>,
}

impl SubstringFilter {
    pub fn new<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { needles: needles.into_iter().map(Into::into).collect() }
    }
}

impl Default for SubstringFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDES.iter().copied())
    }
}

impl PathFilter for SubstringFilter {
    fn excludes(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.needles.iter().any(|n| path_str.contains(n.as_str()))
    }
}

/// Excludes a path when one of its components equals a needle exactly.
#[derive(Debug, Clone)]
pub struct SegmentFilter {
    needles: Vec<String>,
}

impl SegmentFilter {
    pub fn new<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { needles: needles.into_iter().map(Into::into).collect() }
    }
}

impl Default for SegmentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDES.iter().copied())
    }
}

impl PathFilter for SegmentFilter {
    fn excludes(&self, path: &Path) -> bool {
        path.components().any(|c| match c {
            Component::Normal(segment) => {
                let segment = segment.to_string_lossy();
                self.needles.iter().any(|n| segment == n.as_str())
            }
            _ => false,
        })
    }
}

/// Lazy sequence of candidate source files under a root.
pub struct SourceFiles<'a> {
    root: PathBuf,
    walker: Walk,
    filter: &'a dyn PathFilter,
}

impl Iterator for SourceFiles<'_> {
    type Item = Result<SourceFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dent = match self.walker.next()? {
                Ok(dent) => dent,
                Err(e) => return Some(Err(Error::Walk(e))),
            };
            let p = dent.path();
            if !p.is_file() {
                continue;
            }

            let is_python = p
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| PYTHON_EXTENSIONS.contains(&ext));
            if !is_python {
                continue;
            }

            if self.filter.excludes(p) {
                trace!("Skipping excluded file: {}", p.display());
                continue;
            }

            trace!("Found source file: {}", p.display());
            return Some(Ok(SourceFile::new(&self.root, p.to_path_buf())));
        }
    }
}

/// Walk `root` recursively and yield every Python file not excluded by `filter`.
///
/// Ignore files and hidden entries are not honoured; every file under the root
/// is a candidate. Entries are visited in file-name order so that repeated
/// scans of the same tree produce the same sequence.
pub fn discover<'a>(root: &Path, filter: &'a dyn PathFilter) -> Result<SourceFiles<'a>> {
    if !root.is_dir() {
        debug!("Root directory does not exist: {}", root.display());
        return Err(Error::DirectoryNotFound(root.to_path_buf()));
    }

    debug!("Walking directory tree from root: {}", root.display());
    let walker =
        WalkBuilder::new(root).standard_filters(false).sort_by_file_name(|a, b| a.cmp(b)).build();

    Ok(SourceFiles { root: root.to_path_buf(), walker, filter })
}
