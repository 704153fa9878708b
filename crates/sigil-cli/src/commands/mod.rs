//! CLI commands.

pub mod check;
pub mod parse;

use sigil_parser::ParseError;
use std::path::Path;

/// Read a whole file, mapping failures into a report.
pub fn read_source(file: &Path) -> miette::Result<String> {
    std::fs::read_to_string(file)
        .map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))
}

/// Print a parse error with the offending source line.
pub fn print_error(file: &Path, source: &str, err: &ParseError) {
    let position = err.position();
    eprintln!("  error: {}", err.kind());
    eprintln!("   --> {}:{}", file.display(), position);
    eprintln!("    |");
    if let Some(line) = source.lines().nth(position.line.saturating_sub(1)) {
        eprintln!("{:4} | {}", position.line, line);
    }
    eprintln!("    |");
}
