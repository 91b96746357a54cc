mod logging;
mod project_info;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use skybridge_core::ProjectInfo;
use skybridge_duplicate_imports::{Config, OutputFormat};
use std::io::{BufWriter, Write};
use std::{env, path::PathBuf, time::Instant};

#[derive(Parser)]
#[command(name = "skybridge")]
#[command(version, about = "Maintenance tasks for Python projects", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run code checks
    #[command(subcommand)]
    Check(CheckCommands),
    /// Inspect the project configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Debug, Subcommand)]
enum CheckCommands {
    /// Check for imports duplicated across Python files
    Imports(Config),
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Show version, git root and project directories
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug, cli.log_file.as_deref())?;
    debug!("Parsed CLI arguments: {:?}", cli.command);

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    match cli.command {
        Commands::Check(CheckCommands::Imports(cfg)) => check_imports(&mut stdout, &cfg),
        Commands::Config(ConfigCommands::Info) => {
            let cwd = env::current_dir().context("Failed to read current directory")?;
            let project = ProjectInfo::collect(env!("CARGO_PKG_VERSION"), &cwd);
            project_info::print_project_info(&mut stdout, &project)?;
            Ok(())
        }
    }
}

fn check_imports<W: Write>(stdout: &mut W, cfg: &Config) -> Result<()> {
    let start = Instant::now();
    let num_threads = rayon::current_num_threads();
    info!(
        "Running duplicate import check on {} (using {} threads)",
        cfg.path.display(),
        num_threads
    );
    debug!("Config: format={:?}, exclude_mode={:?}", cfg.format, cfg.exclude_mode);

    let result = skybridge_duplicate_imports::run_duplicate_import_check(cfg)?;

    match cfg.format {
        OutputFormat::Json => skybridge_duplicate_imports::print_json(stdout, &result)?,
        OutputFormat::Text => {
            skybridge_duplicate_imports::print_syntax_errors(stdout, &result.syntax_errors)?;
            if result.report.is_empty() {
                skybridge_duplicate_imports::print_no_duplicates_message(stdout)?;
            } else {
                skybridge_duplicate_imports::print_duplicates(stdout, &result)?;
            }
        }
    }
    stdout.flush()?;

    info!(
        "Finished in {}ms on {} files (using {} threads)",
        start.elapsed().as_millis(),
        result.files_scanned,
        num_threads
    );

    if !result.report.is_empty() {
        // Non-zero exit to fail CI
        std::process::exit(1);
    }

    Ok(())
}
