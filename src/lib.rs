//! memquery: in-memory record search with a small boolean query language
//!
//! The query language supports field substring matches (`author:john`),
//! numeric comparisons (`year >= 2024`), the boolean combinators `AND`,
//! `OR`, and `NOT` with conventional precedence, parenthesised grouping,
//! and the `*` wildcard matching every record.
//!
//! # Example
//! ```
//! use memquery::{Record, SearchEngine};
//!
//! let mut engine = SearchEngine::new();
//! engine.load_data(vec![
//!     Record::new()
//!         .with_field("author", "John Smith")
//!         .with_field("department", "Engineering")
//!         .with_field("year", 2024),
//!     Record::new()
//!         .with_field("author", "Jane Doe")
//!         .with_field("department", "Finance")
//!         .with_field("year", 2023),
//! ]);
//!
//! let hits = engine.search("year >= 2024 AND department:Engineering").unwrap();
//! assert_eq!(hits.len(), 1);
//! ```

// Core module with fundamental data structures and the error type
pub mod core;

// Query pipeline: lexer, parser, AST, evaluator, engine
pub mod query;

// Re-export core types
pub use crate::core::error::{Error, Result};
pub use crate::core::record::{records_from_json, FieldValue, Record};

// Re-export the query pipeline API
pub use crate::query::{
    parse_query, CompareOp, Evaluator, Expr, Lexer, Parser, QueryContext, SearchEngine, SearchExt,
    Token, TokenKind,
};
