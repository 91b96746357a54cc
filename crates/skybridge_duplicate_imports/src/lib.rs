//! Duplicate import detection for Python projects.
//!
//! This crate scans a source tree, extracts every `import` and `from ... import`
//! declaration and reports the ones declared by more than one file. Imports of
//! the allow-listed shared modules (`src.types` and `src.__init__` by default)
//! are never reported.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use skybridge_duplicate_imports::{Config, run_duplicate_import_check};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::new("src");
//! let result = run_duplicate_import_check(&cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! if result.report.is_empty() {
//!     skybridge_duplicate_imports::print_no_duplicates_message(&mut stdout)?;
//! } else {
//!     skybridge_duplicate_imports::print_duplicates(&mut stdout, &result)?;
//! }
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom allow-list
//!
//! ```no_run
//! use skybridge_duplicate_imports::{AllowList, Config, run_duplicate_import_check};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut cfg = Config::new("lib");
//! cfg.allow_list = AllowList::new("pkg", ["types", "__init__"]);
//! let result = run_duplicate_import_check(&cfg)?;
//! for duplicate in &result.report {
//!     println!("{}: {} files", duplicate.key, duplicate.files.len());
//! }
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod constants;
mod reporter;
mod types;

// Re-export public API
pub use checker::{aggregate, find_duplicates, run_duplicate_import_check};
pub use config::{AllowList, Config, ExcludeMode, OutputFormat};
pub use constants::{DEFAULT_ALLOW_ROOT, DEFAULT_ALLOW_SUBMODULES, DEFAULT_SCAN_PATH};
pub use reporter::{print_duplicates, print_json, print_no_duplicates_message, print_syntax_errors};
pub use types::{CheckResult, Duplicate, DuplicateReport, ImportIndex};
