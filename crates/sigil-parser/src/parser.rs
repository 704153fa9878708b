//! Character-level recursive descent parser for Sigil.

use std::io::Read;

use sigil_ast::*;
use sigil_cursor::{Cursor, CursorError};

use crate::error::{ParseError, ParseErrorKind};
use crate::options::ParseOptions;

type PResult<T> = Result<T, ParseErrorKind>;

/// Parser for Sigil documents.
///
/// Reads directly from a [`Cursor`]; every reader below consumes exactly the
/// characters it needs and relies on at most one character of pushback.
pub struct Parser<R> {
    cursor: Cursor<R>,
    options: ParseOptions,
    document: Document,
}

impl<R: Read> Parser<R> {
    /// Create a parser with default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParseOptions::default())
    }

    pub fn with_options(reader: R, options: ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(reader),
            options,
            document: Document::new(),
        }
    }

    /// Current line/column of the underlying cursor.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    // ========================================================================
    // Top-level parsing
    // ========================================================================

    /// Parse statements until the input is exhausted.
    ///
    /// The first malformed construct aborts the whole parse; the returned
    /// error holds everything read up to that point.
    pub fn parse_document(mut self) -> Result<Document, ParseError> {
        loop {
            match self.read_statement() {
                Ok(Some(stmt)) => {
                    let position = self.cursor.position();
                    tracing::trace!(%position, statement = %stmt, "read statement");
                    self.document.push(stmt);
                }
                Ok(None) => {
                    tracing::debug!(statements = self.document.len(), "parse complete");
                    return Ok(self.document);
                }
                Err(kind) => {
                    let err = self.fail(kind);
                    tracing::debug!(
                        position = %err.position,
                        statements = err.document.len(),
                        error = %err.kind,
                        "parse aborted"
                    );
                    return Err(err);
                }
            }
        }
    }

    /// Read a single `@name` or `"literal"` at the cursor.
    ///
    /// Unlike expressions in statement position there is no fallback to a
    /// raw query: any other leading character is an error.
    pub fn parse_reference(&mut self) -> Result<Expression, ParseError> {
        self.read_reference().map_err(|kind| self.fail(kind))
    }

    fn fail(&mut self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            position: self.cursor.position(),
            document: std::mem::take(&mut self.document),
        }
    }

    /// Returns `None` when the input ends before a statement starts.
    fn read_statement(&mut self) -> PResult<Option<Statement>> {
        loop {
            let c = match self.cursor.next() {
                Ok(c) => c,
                Err(CursorError::EndOfInput) => return Ok(None),
                Err(e) => return Err(ParseErrorKind::Cursor(e)),
            };

            let stmt = match c {
                '~' => self.read_option()?,
                '$' => self.read_set_variable()?,
                '@' => self.read_call()?,
                c if c.is_whitespace() => continue,
                _ => {
                    self.pushback()?;
                    self.read_set_component()?
                }
            };
            return Ok(Some(stmt));
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn read_option(&mut self) -> PResult<Statement> {
        let key = self.read_to_colon()?;
        let value = self.read_to_newline()?;
        Ok(SetOption {
            key: key.into(),
            value,
        }
        .into())
    }

    fn read_set_variable(&mut self) -> PResult<Statement> {
        let name = self.read_to_colon()?;
        let value = self.read_expression()?;
        Ok(SetVariable {
            name: name.into(),
            value,
        }
        .into())
    }

    fn read_set_component(&mut self) -> PResult<Statement> {
        let component = self.read_to_colon()?;
        let query = self.read_expression()?;
        Ok(SetComponent {
            component: component.into(),
            query,
        }
        .into())
    }

    fn read_call(&mut self) -> PResult<Statement> {
        let name = self.read_to('(')?;
        let args = self.read_arguments()?;
        // Anything between `)` and `:` is ignored.
        self.read_to_colon()?;
        let on = self.read_expression()?;
        Ok(Call {
            name: name.into(),
            args,
            on,
        }
        .into())
    }

    /// Argument list after `(`, up to and including `)`.
    fn read_arguments(&mut self) -> PResult<Vec<Expression>> {
        self.skip_whitespace(")")?;
        if self.next(")")? == ')' {
            return Ok(Vec::new());
        }
        self.pushback()?;

        let raw = self.read_to(')')?;
        raw.split(',').map(|piece| self.argument(piece)).collect()
    }

    fn argument(&self, piece: &str) -> PResult<Expression> {
        let arg = piece.trim();
        let closed = arg.len() >= 2 && arg.ends_with('"');
        if !arg.starts_with('"') || (self.options.strict_arguments && !closed) {
            return Err(ParseErrorKind::MalformedArgument {
                argument: arg.to_string(),
            });
        }

        let text = arg.strip_prefix('"').unwrap_or(arg);
        let text = text.strip_suffix('"').unwrap_or(text);
        Ok(Expression::Literal(text.to_string()))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn read_expression(&mut self) -> PResult<Expression> {
        match self.next("expression")? {
            '@' => self.read_variable(),
            '"' => self.read_literal(),
            _ => {
                self.pushback()?;
                Ok(Expression::Query(self.read_to_newline()?))
            }
        }
    }

    fn read_reference(&mut self) -> PResult<Expression> {
        match self.next("`@` or `\"`")? {
            '@' => self.read_variable(),
            '"' => self.read_literal(),
            found => {
                self.pushback()?;
                Err(ParseErrorKind::UnexpectedCharacter {
                    expected: "`@` or `\"`".to_string(),
                    found,
                })
            }
        }
    }

    fn read_variable(&mut self) -> PResult<Expression> {
        let name = self.read_to_whitespace()?;
        Ok(Expression::Variable(name.into()))
    }

    fn read_literal(&mut self) -> PResult<Expression> {
        let text = self.read_to('"')?;
        // Trailing punctuation glued to the closing quote is dropped.
        self.read_to_whitespace()?;
        Ok(Expression::Literal(text))
    }

    // ========================================================================
    // Character helpers
    // ========================================================================

    /// Next character; running out of input here is an error, reported as a
    /// missing `expected`.
    fn next(&mut self, expected: &str) -> PResult<char> {
        self.cursor.next().map_err(|e| match e {
            CursorError::EndOfInput => ParseErrorKind::delimiter(expected, "end of input"),
            other => ParseErrorKind::Cursor(other),
        })
    }

    fn pushback(&mut self) -> PResult<()> {
        self.cursor.pushback().map_err(ParseErrorKind::Cursor)
    }

    /// Read up to `delimiter`, consuming it. A newline first is an error
    /// reported at the end of the offending line.
    fn read_to(&mut self, delimiter: char) -> PResult<String> {
        let expected = delimiter.to_string();
        let mut text = String::new();
        loop {
            match self.next(&expected)? {
                c if c == delimiter => return Ok(text),
                '\n' => {
                    self.pushback()?;
                    return Err(ParseErrorKind::delimiter(expected, "newline"));
                }
                c => text.push(c),
            }
        }
    }

    /// Read up to `:`, then skip the whitespace (newlines included) after it.
    fn read_to_colon(&mut self) -> PResult<String> {
        let text = self.read_to(':')?;
        self.skip_whitespace("value")?;
        Ok(text)
    }

    fn read_to_newline(&mut self) -> PResult<String> {
        let mut text = String::new();
        loop {
            match self.next("newline")? {
                '\n' => return Ok(text),
                c => text.push(c),
            }
        }
    }

    /// Read up to the next whitespace character, leaving it unread.
    fn read_to_whitespace(&mut self) -> PResult<String> {
        let mut text = String::new();
        loop {
            let c = self.next("whitespace")?;
            if c.is_whitespace() {
                self.pushback()?;
                return Ok(text);
            }
            text.push(c);
        }
    }

    fn skip_whitespace(&mut self, expected: &str) -> PResult<()> {
        loop {
            if !self.next(expected)?.is_whitespace() {
                return self.pushback();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Document, ParseError> {
        Parser::new(source.as_bytes()).parse_document()
    }

    fn parse_ok(source: &str) -> Document {
        match parse(source) {
            Ok(doc) => doc,
            Err(err) => panic!("parse failed: {}", err),
        }
    }

    fn single(source: &str) -> Statement {
        let doc = parse_ok(source);
        assert_eq!(doc.len(), 1, "expected one statement in {:?}", source);
        doc.statements.into_iter().next().unwrap()
    }

    #[test]
    fn test_set_option() {
        match single("~verbose: true\n") {
            Statement::SetOption(opt) => {
                assert_eq!(opt.key.as_str(), "verbose");
                assert_eq!(opt.value, "true");
            }
            other => panic!("expected option, got {:?}", other),
        }
    }

    #[test]
    fn test_option_value_is_verbatim() {
        match single("~title:   a: b \"c\" @d\n") {
            Statement::SetOption(opt) => assert_eq!(opt.value, "a: b \"c\" @d"),
            other => panic!("expected option, got {:?}", other),
        }
    }

    #[test]
    fn test_set_variable_literal() {
        assert_eq!(
            single("$name: \"alice\"\n"),
            Statement::SetVariable(SetVariable {
                name: "name".into(),
                value: Expression::Literal("alice".into()),
            })
        );
    }

    #[test]
    fn test_set_variable_reference() {
        assert_eq!(
            single("$alias: @name\n"),
            Statement::SetVariable(SetVariable {
                name: "alias".into(),
                value: Expression::Variable("name".into()),
            })
        );
    }

    #[test]
    fn test_set_component_query() {
        assert_eq!(
            single("widget.title: Hello World\n"),
            Statement::SetComponent(SetComponent {
                component: "widget.title".into(),
                query: Expression::Query("Hello World".into()),
            })
        );
    }

    #[test]
    fn test_call_with_arguments() {
        assert_eq!(
            single("@resize(\"10\",\"20\"): @target\n"),
            Statement::Call(Call {
                name: "resize".into(),
                args: vec![
                    Expression::Literal("10".into()),
                    Expression::Literal("20".into()),
                ],
                on: Expression::Variable("target".into()),
            })
        );
    }

    #[test]
    fn test_call_without_arguments() {
        match single("@refresh(  ): main.list\n") {
            Statement::Call(call) => {
                assert_eq!(call.name.as_str(), "refresh");
                assert!(call.args.is_empty());
                assert_eq!(call.on, Expression::Query("main.list".into()));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_call_arguments_are_trimmed() {
        match single("@move( \"a b\" ,  \"c\" ): \"x\"\n") {
            Statement::Call(call) => {
                assert_eq!(
                    call.args,
                    vec![
                        Expression::Literal("a b".into()),
                        Expression::Literal("c".into()),
                    ]
                );
                assert_eq!(call.on, Expression::Literal("x".into()));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_call_ignores_text_before_colon() {
        match single("@hide() then: @panel\n") {
            Statement::Call(call) => assert_eq!(call.on, Expression::Variable("panel".into())),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_argument_quote_is_permissive() {
        match single("@f(\"abc): @x\n") {
            Statement::Call(call) => assert_eq!(call.args, vec![Expression::Literal("abc".into())]),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_argument_quote_rejected_when_strict() {
        let err = Parser::with_options("@f(\"abc): @x\n".as_bytes(), ParseOptions::strict())
            .parse_document()
            .unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::MalformedArgument { ref argument } if argument == "\"abc"
        ));
    }

    #[test]
    fn test_unquoted_argument_is_malformed() {
        let err = parse("@f(\"a\", b): @x\n").unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @r#"1:10: malformed argument "b": arguments must be quoted strings"#
        );
    }

    #[test]
    fn test_empty_argument_is_malformed() {
        let err = parse("@f(\"a\",): @x\n").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::MalformedArgument { ref argument } if argument.is_empty()
        ));
    }

    #[test]
    fn test_literal_trailing_token_is_skipped() {
        assert_eq!(
            single("$x: \"v\";;\n"),
            Statement::SetVariable(SetVariable {
                name: "x".into(),
                value: Expression::Literal("v".into()),
            })
        );
    }

    #[test]
    fn test_text_after_variable_starts_next_statement() {
        let doc = parse_ok("$a: @b c: d\n");
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc.statements[1],
            Statement::SetComponent(SetComponent {
                component: "c".into(),
                query: Expression::Query("d".into()),
            })
        );
    }

    #[test]
    fn test_whitespace_after_colon_spans_lines() {
        assert_eq!(
            single("$x:\n\n   \"y\"\n"),
            Statement::SetVariable(SetVariable {
                name: "x".into(),
                value: Expression::Literal("y".into()),
            })
        );
    }

    #[test]
    fn test_statements_keep_source_order() {
        let doc = parse_ok(concat!(
            "~verbose: true\n",
            "\n",
            "   $name: \"alice\"\n",
            "widget.title: Hello World\n",
            "\t@resize(\"10\",\"20\"): @target\n",
        ));
        let kinds: Vec<_> = doc
            .iter()
            .map(|s| match s {
                Statement::SetOption(_) => "option",
                Statement::SetVariable(_) => "variable",
                Statement::SetComponent(_) => "component",
                Statement::Call(_) => "call",
            })
            .collect();
        assert_eq!(kinds, vec!["option", "variable", "component", "call"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse_ok("").is_empty());
        assert!(parse_ok(" \n\t\n").is_empty());
    }

    #[test]
    fn test_missing_colon() {
        let err = parse("~key value\n").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::Delimiter { ref expected, ref got } if expected == ":" && got == "newline"
        ));
        assert_eq!(err.position, Position::new(1, 10));
        assert!(err.document.is_empty());
        insta::assert_snapshot!(err.to_string(), @"1:10: expected `:`, got newline");
    }

    #[test]
    fn test_error_keeps_partial_document() {
        let err = parse("~a: 1\n$b: @c\n\nbroken\n").unwrap_err();
        assert_eq!(err.position.line, 4);
        assert_eq!(err.partial_document().len(), 2);
    }

    #[test]
    fn test_unterminated_literal() {
        let err = parse("$x: \"abc\n").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::Delimiter { ref expected, .. } if expected == "\""
        ));
        assert_eq!(err.position, Position::new(1, 8));
    }

    #[test]
    fn test_unterminated_call_name() {
        let err = parse("@resize\n").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"1:7: expected `(`, got newline");
    }

    #[test]
    fn test_unterminated_argument_list() {
        let err = parse("@f(\"a\"\n): @x\n").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"1:6: expected `)`, got newline");
    }

    #[test]
    fn test_end_of_input_inside_statement() {
        let err = parse("widget.title: Hello").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"1:19: expected newline, got end of input");
    }

    #[test]
    fn test_reference_reader() {
        let mut parser = Parser::new("@target \"lit\"x y".as_bytes());
        assert_eq!(
            parser.parse_reference().unwrap(),
            Expression::Variable("target".into())
        );
        // The whitespace after the variable is left for the caller.
        assert_eq!(parser.position(), Position::new(1, 7));
        parser.skip_whitespace("reference").unwrap();
        assert_eq!(
            parser.parse_reference().unwrap(),
            Expression::Literal("lit".into())
        );
    }

    #[test]
    fn test_reference_reader_rejects_query() {
        let mut parser = Parser::new("plain text\n".as_bytes());
        let err = parser.parse_reference().unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::UnexpectedCharacter { found: 'p', .. }
        ));
        assert_eq!(err.position, Position::new(1, 0));
    }

    #[test]
    fn test_deterministic() {
        let source = "~a: b\n$c: \"d\"\n@e(\"f\"): g h\n";
        assert_eq!(parse_ok(source), parse_ok(source));
    }
}
