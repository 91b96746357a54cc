use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target, WriteStyle};
use std::{fs::OpenOptions, path::Path};

/// Initialise the global logger.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` with `--debug`
/// and `warn` without. With a log file, records are appended to it instead of
/// going to stderr.
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if debug { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(level));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file))).write_style(WriteStyle::Never);
    }

    builder.try_init().context("Failed to initialise logger")?;
    Ok(())
}
