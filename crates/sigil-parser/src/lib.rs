//! # Sigil Parser
//!
//! Parses Sigil documents into an in-memory [`Document`].
//!
//! Recursive descent straight over characters: there is no token stream.
//! Each statement is recognised from its leading character and read with
//! at most one character of lookahead. The first malformed construct
//! aborts the parse.
//!
//! ## Example
//!
//! ```
//! use sigil_ast::{Expression, Statement};
//! use sigil_parser::parse_str;
//!
//! let source = "~verbose: true\n$name: \"alice\"\n@greet(\"hi\"): @name\n";
//!
//! let doc = parse_str(source).unwrap();
//! assert_eq!(doc.len(), 3);
//! match &doc.statements[2] {
//!     Statement::Call(call) => assert_eq!(call.on, Expression::Variable("name".into())),
//!     _ => unreachable!(),
//! }
//! ```

mod error;
mod options;
mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use options::ParseOptions;
pub use parser::Parser;

use sigil_ast::Document;
use std::io::Read;

/// Parse a document from a reader.
pub fn parse<R: Read>(reader: R) -> Result<Document, ParseError> {
    Parser::new(reader).parse_document()
}

/// Parse a document from a reader with explicit options.
pub fn parse_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Document, ParseError> {
    Parser::with_options(reader, options).parse_document()
}

/// Parse a document held in memory.
pub fn parse_str(source: &str) -> Result<Document, ParseError> {
    parse(source.as_bytes())
}
