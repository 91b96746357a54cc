use colored::Colorize;
use skybridge_core::ProjectInfo;
use std::io::{self, Write};

pub fn print_project_info<W: Write>(writer: &mut W, info: &ProjectInfo) -> io::Result<()> {
    writeln!(writer, "{}", "Sky Bridge configuration".bold())?;
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "  {:<18} {}", "Version".cyan(), info.version.green())?;

    let profile = if cfg!(debug_assertions) { "debug" } else { "release" };
    writeln!(writer, "  {:<18} {}", "Build profile".cyan(), profile.green())?;

    let git_root = match &info.git_root {
        Some(root) => root.display().to_string().green(),
        None => "not a git repository".yellow(),
    };
    writeln!(writer, "  {:<18} {}", "Git root".cyan(), git_root)?;

    for dir in &info.directories {
        let marker = if dir.exists { "✓".green() } else { "✗".red() };
        let label = format!("Directory {}", dir.name);
        writeln!(writer, "  {:<18} {} {}", label.cyan(), marker, dir.path.display())?;
    }

    writer.flush()?;
    Ok(())
}
