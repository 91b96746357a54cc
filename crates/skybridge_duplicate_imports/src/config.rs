use clap::{Parser, ValueEnum};
use skybridge_core::{PathFilter, SegmentFilter, SubstringFilter};
use std::path::PathBuf;

use crate::constants::{DEFAULT_ALLOW_ROOT, DEFAULT_ALLOW_SUBMODULES, DEFAULT_SCAN_PATH};

#[derive(Debug, Clone, Parser)]
#[command(name = "imports")]
#[command(about = "Check for imports duplicated across Python files")]
pub struct Config {
    /// Directory to scan
    #[arg(long, short, default_value = DEFAULT_SCAN_PATH)]
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// How excluded paths (test, venv) are matched
    #[arg(long, value_enum, default_value_t = ExcludeMode::Substring)]
    pub exclude_mode: ExcludeMode,

    #[clap(skip)]
    pub allow_list: AllowList,
}

impl Config {
    /// Config scanning `path` with every other option at its default.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: OutputFormat::Text,
            exclude_mode: ExcludeMode::Substring,
            allow_list: AllowList::default(),
        }
    }

    pub fn path_filter(&self) -> Box<dyn PathFilter> {
        match self.exclude_mode {
            ExcludeMode::Substring => Box::new(SubstringFilter::default()),
            ExcludeMode::Segment => Box::new(SegmentFilter::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExcludeMode {
    /// Skip any path containing `test` or `venv`
    Substring,
    /// Skip paths with a `test` or `venv` directory or file name
    Segment,
}

/// Modules that may be imported from any number of files.
///
/// Expressed as a root package plus submodule markers: the default root `src`
/// with markers `types` and `__init__` exempts `src.types` and `src.__init__`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    root: String,
    submodules: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(root: impl Into<String>, submodules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { root: root.into(), submodules: submodules.into_iter().map(Into::into).collect() }
    }

    /// Dotted prefixes covered by this list, e.g. `src.types`.
    pub fn prefixes(&self) -> Vec<String> {
        self.submodules.iter().map(|s| format!("{}.{}", self.root, s)).collect()
    }

    /// Whether a direct import identity is exempt.
    ///
    /// This is a raw string prefix test, so `src.typesafe` is covered by
    /// `src.types` as well.
    pub fn allows_direct(&self, identity: &str) -> bool {
        self.prefixes().iter().any(|p| identity.starts_with(p.as_str()))
    }

    /// Whether a from-import with the given module path segments is exempt.
    pub fn allows_from(&self, module_parts: &[&str]) -> bool {
        module_parts.len() >= 2
            && module_parts[0] == self.root
            && self.submodules.iter().any(|s| s == module_parts[1])
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOW_ROOT, DEFAULT_ALLOW_SUBMODULES.iter().copied())
    }
}
