//! Query pipeline for searching in-memory record sets
//!
//! A query string moves through the pipeline:
//! tokenization → recursive-descent parsing → expression tree →
//! evaluation against the loaded dataset.
//!
//! The module is organized into:
//! - ast: token and AST definitions
//! - lexer_parser: lexical analysis and parsing
//! - evaluator: expression evaluation and query context
//! - engine: search engine and record-slice integration

mod ast;
mod engine;
mod evaluator;
mod lexer_parser;

pub use ast::{CompareOp, Expr, Token, TokenKind};
pub use engine::{SearchEngine, SearchExt};
pub use evaluator::{Evaluator, QueryContext};
pub use lexer_parser::{Lexer, Parser};

use crate::core::error::Result;

/// Parse a query string into an expression tree without evaluating it.
///
/// Useful for validating a query ahead of time or inspecting its shape.
pub fn parse_query(query: &str) -> Result<Expr> {
    let tokens = Lexer::new(query).tokenize()?;
    Parser::new(tokens).parse()
}
