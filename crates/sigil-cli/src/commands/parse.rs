//! Parse command - parse a file and show the document.

use sigil_ast::{Document, Expression, Statement};
use sigil_parser::{parse_with_options, ParseOptions};
use std::fmt::Write;
use std::path::Path;

use super::{print_error, read_source};

pub fn run(file: &Path, json: bool, options: ParseOptions) -> miette::Result<()> {
    let source = read_source(file)?;

    tracing::debug!(file = %file.display(), ?options, "parsing");

    match parse_with_options(source.as_bytes(), options) {
        Ok(doc) => {
            show(&doc, json)?;
            Ok(())
        }
        Err(err) => {
            eprintln!("Partial document:");
            show(err.partial_document(), json)?;
            print_error(file, &source, &err);
            Err(miette::miette!("{}: {}", file.display(), err))
        }
    }
}

fn show(doc: &Document, json: bool) -> miette::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(doc)
            .map_err(|e| miette::miette!("Failed to serialize document: {}", e))?;
        println!("{}", out);
    } else {
        print!("{}", render_tree(doc));
    }
    Ok(())
}

/// One line per statement, with the expression shapes spelled out.
fn render_tree(doc: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Document ({} statements)", doc.len());

    for stmt in doc {
        let _ = match stmt {
            Statement::SetOption(opt) => {
                writeln!(out, "  SetOption {} = {:?}", opt.key, opt.value)
            }
            Statement::SetVariable(var) => {
                writeln!(out, "  SetVariable {} = {}", var.name, describe(&var.value))
            }
            Statement::SetComponent(comp) => writeln!(
                out,
                "  SetComponent {} = {}",
                comp.component,
                describe(&comp.query)
            ),
            Statement::Call(call) => {
                let args: Vec<_> = call.args.iter().map(describe).collect();
                writeln!(
                    out,
                    "  Call {}({}) on {}",
                    call.name,
                    args.join(", "),
                    describe(&call.on)
                )
            }
        };
    }

    out
}

fn describe(expr: &Expression) -> String {
    match expr {
        Expression::Variable(name) => format!("Variable({})", name),
        Expression::Literal(text) => format!("Literal({:?})", text),
        Expression::Query(text) => format!("Query({:?})", text),
    }
}
