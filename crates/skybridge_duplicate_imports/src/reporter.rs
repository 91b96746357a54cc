use std::io::{self, Write};

use colored::Colorize;
use log::debug;
use skybridge_core::SourceFile;

use crate::types::CheckResult;

pub fn print_no_duplicates_message<W: Write>(writer: &mut W) -> io::Result<()> {
    debug!("No duplicate imports detected");
    writeln!(writer, "{} No duplicate imports found!", "✓".green().bold())?;
    writer.flush()?;
    Ok(())
}

pub fn print_syntax_errors<W: Write>(writer: &mut W, files: &[SourceFile]) -> io::Result<()> {
    for file in files {
        writeln!(writer, "{} Syntax error in {}", "✗".red().bold(), file.to_string().yellow())?;
    }
    Ok(())
}

/// Print every duplicated import followed by the files declaring it.
pub fn print_duplicates<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("Printing {} duplicate imports", result.report.len());
    writeln!(writer, "\n{} Duplicate imports found:", "✗".red().bold())?;

    for duplicate in &result.report {
        writeln!(writer, "\n{} imported in:", duplicate.key.bold())?;
        for file in &duplicate.files {
            writeln!(writer, "  - {}", file.to_string().blue())?;
        }
    }

    print_summary(writer, result)?;
    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    let offending_files = {
        let mut files: Vec<&SourceFile> =
            result.report.iter().flat_map(|d| d.files.iter()).collect();
        files.sort_by(|a, b| a.path().cmp(b.path()));
        files.dedup();
        files.len()
    };

    writeln!(writer, "\n{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(
        writer,
        "  Duplicate imports: {}",
        result.report.len().to_string().yellow().bold()
    )?;
    writeln!(writer, "  Files involved: {}", offending_files.to_string().yellow())?;
    writeln!(writer, "  Files scanned: {}", result.files_scanned.to_string().cyan())?;
    Ok(())
}

/// Machine-readable rendering of the whole result.
pub fn print_json<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
