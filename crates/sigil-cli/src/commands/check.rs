//! Check command - parse files and report the first error in each.

use sigil_parser::{parse_with_options, ParseOptions};
use std::path::{Path, PathBuf};

use super::{print_error, read_source};

pub fn run(files: &[PathBuf], options: ParseOptions) -> miette::Result<()> {
    if files.is_empty() {
        return Err(miette::miette!("No files specified"));
    }

    let mut failed = 0;
    for file in files {
        if !check_file(file, options)? {
            failed += 1;
        }
    }

    println!();
    if failed > 0 {
        println!("Check complete: {} of {} file(s) failed", failed, files.len());
        Err(miette::miette!("{} file(s) failed to parse", failed))
    } else {
        println!("Check complete: no issues found");
        Ok(())
    }
}

fn check_file(file: &Path, options: ParseOptions) -> miette::Result<bool> {
    let source = read_source(file)?;

    println!("Checking: {}", file.display());
    tracing::debug!(file = %file.display(), bytes = source.len(), "checking");

    match parse_with_options(source.as_bytes(), options) {
        Ok(doc) => {
            println!("  ok ({} statements)", doc.len());
            Ok(true)
        }
        Err(err) => {
            print_error(file, &source, &err);
            Ok(false)
        }
    }
}
