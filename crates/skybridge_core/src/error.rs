use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Directory '{}' not found", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Failed to load the Python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

pub type Result<T> = std::result::Result<T, Error>;
