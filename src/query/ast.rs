//! Token and AST definitions for search queries
//!
//! This module contains the token and abstract syntax tree (AST) types
//! used for lexing, parsing, and representing search query expressions.

use std::fmt;

/// Token kinds for query lexing
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Field name (e.g. `author`, `year`)
    Ident(String),
    /// Match or comparison operand (e.g. `john`, `2024`)
    Value(String),
    /// Field match separator `:`
    Colon,
    /// The keyword `AND`
    And,
    /// The keyword `OR`
    Or,
    /// The keyword `NOT`
    Not,
    /// Greater than `>`
    Gt,
    /// Lower than `<`
    Lt,
    /// Greater than or equal `>=`
    Ge,
    /// Lower than or equal `<=`
    Le,
    /// Left parenthesis `(`
    LeftParen,
    /// Right parenthesis `)`
    RightParen,
    /// Wildcard `*`
    Star,
    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Value(text) => write!(f, "value '{}'", text),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::And => write!(f, "'AND'"),
            TokenKind::Or => write!(f, "'OR'"),
            TokenKind::Not => write!(f, "'NOT'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A lexical token with its character offset in the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// Numeric comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Lt,
    Ge,
    Le,
}

impl CompareOp {
    /// Apply the comparison to two numbers.
    pub fn compare(&self, left: f64, right: f64) -> bool {
        match self {
            CompareOp::Gt => left > right,
            CompareOp::Lt => left < right,
            CompareOp::Ge => left >= right,
            CompareOp::Le => left <= right,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Ge => write!(f, ">="),
            CompareOp::Le => write!(f, "<="),
        }
    }
}

/// Expression AST node types
///
/// The tree is immutable once built; evaluating a node is a pure function
/// of the node, the dataset, and the query context.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Case-insensitive substring match against a named field
    Field { field: String, value: String },
    /// Numeric comparison against a named field
    Comparison {
        field: String,
        op: CompareOp,
        value: f64,
    },
    /// Matches every record
    Wildcard,
    /// Both sides must match
    And(Box<Expr>, Box<Expr>),
    /// Either side may match
    Or(Box<Expr>, Box<Expr>),
    /// Inverts the inner expression
    Not(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Field { field, value } => write!(f, "{}:{}", field, value),
            Expr::Comparison { field, op, value } => write!(f, "{} {} {}", field, op, value),
            Expr::Wildcard => write!(f, "*"),
            Expr::And(left, right) => write!(f, "({} AND {})", left, right),
            Expr::Or(left, right) => write!(f, "({} OR {})", left, right),
            Expr::Not(inner) => write!(f, "(NOT {})", inner),
        }
    }
}
