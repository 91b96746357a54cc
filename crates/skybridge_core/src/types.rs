use serde::{Serialize, Serializer};
use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

/// A discovered Python source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    path: PathBuf,
    relative: PathBuf,
}

impl SourceFile {
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        Self { path, relative }
    }

    /// Path as produced by the walk, prefixed with the scan root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the scan root.
    ///
    /// Reports print the walked path; this is for callers wanting a
    /// root-independent key.
    pub fn relative(&self) -> &Path {
        &self.relative
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl Serialize for SourceFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.path.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `import a.b.c`
    Direct,
    /// `from a.b import c`
    From,
}

/// Import identities declared by a single file, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileImports {
    pub direct: BTreeSet<String>,
    pub from: BTreeSet<String>,
}

impl FileImports {
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.from.is_empty()
    }

    pub fn len(&self) -> usize {
        self.direct.len() + self.from.len()
    }

    /// Iterate over every identity together with its kind.
    pub fn iter(&self) -> impl Iterator<Item = (ImportKind, &str)> {
        self.direct
            .iter()
            .map(|i| (ImportKind::Direct, i.as_str()))
            .chain(self.from.iter().map(|i| (ImportKind::From, i.as_str())))
    }
}

/// Outcome of extracting imports from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Parsed(FileImports),
    /// The file could not be parsed; it contributes no identities.
    SyntaxError,
}

impl Extraction {
    pub fn into_imports(self) -> FileImports {
        match self {
            Extraction::Parsed(imports) => imports,
            Extraction::SyntaxError => FileImports::default(),
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Extraction::SyntaxError)
    }
}
