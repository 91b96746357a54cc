//! Core utilities for skybridge tools.
//!
//! This crate provides shared functionality for analyzing Python projects,
//! including:
//! - Discovering source files under a root with a pluggable exclusion filter
//! - Extracting import declarations from Python files with tree-sitter
//! - Project layout and git root detection

mod collector;
mod config;
mod constants;
mod error;
mod parser;
mod types;

// Re-export public API
pub use collector::{PathFilter, SegmentFilter, SourceFiles, SubstringFilter, discover};
pub use config::{DirectoryStatus, ProjectInfo, find_git_root_from};
pub use constants::{DEFAULT_EXCLUDES, PROJECT_DIRECTORIES, PYTHON_EXTENSIONS};
pub use error::{Error, Result};
pub use parser::{ImportParser, ParseFailure};
pub use types::{Extraction, FileImports, ImportKind, SourceFile};
