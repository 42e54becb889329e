//! Search engine and record-slice integration
//!
//! The engine owns the loaded dataset and drives the full pipeline for
//! each query: lex, parse, evaluate, map matching indices back to record
//! references.

use log::{debug, trace};

use crate::core::error::Result;
use crate::core::record::Record;
use crate::query::evaluator::{Evaluator, QueryContext};
use crate::query::lexer_parser::{Lexer, Parser};

/// Search engine over an in-memory record set.
///
/// The dataset is owned for the engine's lifetime and replaced wholesale
/// by [`load_data`](SearchEngine::load_data). Queries are synchronous and
/// pure; callers that share an engine across threads must serialize
/// `load_data` against in-flight `search` calls.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    records: Vec<Record>,
}

impl SearchEngine {
    /// Create an engine with no loaded records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine pre-loaded with a dataset.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Replace the working dataset. No merge: previously loaded records
    /// are dropped.
    pub fn load_data(&mut self, records: Vec<Record>) {
        debug!("loading {} records, replacing {}", records.len(), self.records.len());
        self.records = records;
    }

    /// The currently loaded dataset, in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run a query against the loaded dataset and return matching records
    /// in result order.
    ///
    /// `"*"` alone is the all-records shortcut. An empty dataset yields an
    /// empty result for any valid query.
    ///
    /// # Errors
    /// [`Error::Lex`](crate::Error::Lex) and
    /// [`Error::Syntax`](crate::Error::Syntax) from the lexer and parser
    /// propagate unchanged.
    ///
    /// # Example
    /// ```
    /// use memquery::{Record, SearchEngine};
    ///
    /// let mut engine = SearchEngine::new();
    /// engine.load_data(vec![
    ///     Record::new().with_field("author", "John Smith"),
    ///     Record::new().with_field("author", "Jane Doe"),
    /// ]);
    ///
    /// let hits = engine.search("author:john").unwrap();
    /// assert_eq!(hits.len(), 1);
    /// ```
    pub fn search(&self, query: &str) -> Result<Vec<&Record>> {
        let context = QueryContext::new();
        self.search_with_context(query, &context)
    }

    /// Run a query under a caller-supplied [`QueryContext`].
    pub fn search_with_context(&self, query: &str, context: &QueryContext) -> Result<Vec<&Record>> {
        let tokens = Lexer::new(query).tokenize()?;
        let expr = Parser::new(tokens).parse()?;
        trace!("parsed query '{}' as {}", query, expr);

        let evaluator = Evaluator::new(&self.records, context);
        let indices = evaluator.evaluate(&expr);
        debug!("query '{}' matched {} of {} records", query, indices.len(), self.records.len());

        Ok(indices.into_iter().map(|idx| &self.records[idx]).collect())
    }
}

/// Extension trait adding search directly to record slices.
pub trait SearchExt {
    /// Run a query against this record collection.
    fn search(&self, query: &str) -> Result<Vec<&Record>>;

    /// Run a query with a caller-supplied context.
    fn search_with_context(&self, query: &str, context: &QueryContext) -> Result<Vec<&Record>>;
}

impl SearchExt for [Record] {
    fn search(&self, query: &str) -> Result<Vec<&Record>> {
        let context = QueryContext::new();
        self.search_with_context(query, &context)
    }

    fn search_with_context(&self, query: &str, context: &QueryContext) -> Result<Vec<&Record>> {
        let tokens = Lexer::new(query).tokenize()?;
        let expr = Parser::new(tokens).parse()?;

        let evaluator = Evaluator::new(self, context);
        let indices = evaluator.evaluate(&expr);

        Ok(indices.into_iter().map(|idx| &self[idx]).collect())
    }
}
