//! # Sigil AST
//!
//! Data model for parsed Sigil documents.
//!
//! A document is a flat, ordered list of statements. Every statement is
//! introduced by a sigil (`~`, `$`, `@`) or by a bare component path, and
//! carries one or more expressions. Values are only ever produced by a
//! complete, successful parse; there are no placeholder nodes.

mod ast;
mod position;

pub use ast::*;
pub use position::Position;
