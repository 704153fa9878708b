//! AST node definitions for Sigil.

use smol_str::SmolStr;
use std::fmt;

/// A complete Sigil document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Statements in source order
    pub statements: Vec<Statement>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement.
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }
}

impl From<Vec<Statement>> for Document {
    fn from(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

impl IntoIterator for Document {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

// ============================================================================
// Statements
// ============================================================================

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    /// Option directive: `~verbose: true`
    SetOption(SetOption),
    /// Variable binding: `$name: "alice"`
    SetVariable(SetVariable),
    /// Component assignment: `widget.title: Hello World`
    SetComponent(SetComponent),
    /// Call: `@resize("10", "20"): @target`
    Call(Call),
}

/// A raw key/value directive. The value is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetOption {
    pub key: SmolStr,
    pub value: String,
}

/// Binds a name to an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetVariable {
    pub name: SmolStr,
    pub value: Expression,
}

/// Associates a component path with an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetComponent {
    /// Dotted or path-like component identifier
    pub component: SmolStr,
    pub query: Expression,
}

/// A named operation applied to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    pub name: SmolStr,
    /// Arguments in source order; always `Expression::Literal`
    pub args: Vec<Expression>,
    /// Target expression after the `:`
    pub on: Expression,
}

// ============================================================================
// Expressions
// ============================================================================

/// A value position within a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    /// Variable reference: `@name`
    Variable(SmolStr),
    /// Quoted string with the quotes stripped: `"text"`
    Literal(String),
    /// Verbatim text to end of line
    Query(String),
}

impl Expression {
    /// The text carried by this expression, without any sigil or quotes.
    pub fn text(&self) -> &str {
        match self {
            Expression::Variable(name) => name.as_str(),
            Expression::Literal(text) | Expression::Query(text) => text,
        }
    }
}

impl From<SetOption> for Statement {
    fn from(stmt: SetOption) -> Self {
        Statement::SetOption(stmt)
    }
}

impl From<SetVariable> for Statement {
    fn from(stmt: SetVariable) -> Self {
        Statement::SetVariable(stmt)
    }
}

impl From<SetComponent> for Statement {
    fn from(stmt: SetComponent) -> Self {
        Statement::SetComponent(stmt)
    }
}

impl From<Call> for Statement {
    fn from(stmt: Call) -> Self {
        Statement::Call(stmt)
    }
}

// ============================================================================
// Rendering
// ============================================================================

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Variable(name) => write!(f, "@{}", name),
            Expression::Literal(text) => write!(f, "\"{}\"", text),
            Expression::Query(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::SetOption(opt) => write!(f, "~{}: {}", opt.key, opt.value),
            Statement::SetVariable(var) => write!(f, "${}: {}", var.name, var.value),
            Statement::SetComponent(comp) => write!(f, "{}: {}", comp.component, comp.query),
            Statement::Call(call) => {
                write!(f, "@{}(", call.name)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, "): {}", call.on)
            }
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
