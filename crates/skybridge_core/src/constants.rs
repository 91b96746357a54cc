/// File extensions treated as Python source.
pub const PYTHON_EXTENSIONS: &[&str] = &["py"];

/// Path fragments excluded from a scan by default.
pub const DEFAULT_EXCLUDES: &[&str] = &["test", "venv"];

/// Project directories reported by `config info`.
pub const PROJECT_DIRECTORIES: &[&str] = &["src", "test", "doc", "script"];
