//! Defaults for the duplicate import check.
//!
//! Modules under the allow-listed root that centralize shared types and
//! helpers are expected to be imported from many files, so repeated imports
//! of them are never reported.

/// Root package of the default allow-list.
pub const DEFAULT_ALLOW_ROOT: &str = "src";

/// Submodules of [`DEFAULT_ALLOW_ROOT`] that may be imported anywhere.
pub const DEFAULT_ALLOW_SUBMODULES: &[&str] = &["types", "__init__"];

/// Default directory scanned when no path is given.
pub const DEFAULT_SCAN_PATH: &str = "src";
