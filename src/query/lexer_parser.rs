//! Lexical analysis and parsing for search queries
//!
//! This module converts a raw query string into tokens and then into an
//! expression AST via recursive descent. Precedence, loosest to tightest:
//! `OR`, `AND`, `NOT`; parentheses override everything.

use crate::core::error::{Error, Result};
use crate::query::ast::{CompareOp, Expr, Token, TokenKind};

/// Lexer for search query strings.
///
/// Bare words normally lex to identifiers (field names); directly after a
/// `:` or a comparison operator the next word lexes to a value instead, so
/// `author:john` yields `Ident("author") Colon Value("john")`. Quoted
/// literals lex to values in any position.
pub struct Lexer {
    /// The input stored as characters for position-tracked scanning.
    input: Vec<char>,
    /// Current character offset.
    position: usize,
    /// Whether the next bare word belongs to a value position.
    value_expected: bool,
}

impl Lexer {
    /// Create a new lexer for the given query string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            value_expected: false,
        }
    }

    /// Process the entire input and return the token sequence, terminated
    /// by [`TokenKind::Eof`].
    ///
    /// # Errors
    /// Returns [`Error::Lex`] for a character that starts no valid token
    /// and [`Error::Syntax`] for an unterminated quoted literal.
    ///
    /// # Example
    /// ```
    /// use memquery::{Lexer, TokenKind};
    /// let tokens = Lexer::new("author:john").tokenize().unwrap();
    /// assert_eq!(tokens[0].kind, TokenKind::Ident("author".to_string()));
    /// assert_eq!(tokens[2].kind, TokenKind::Value("john".to_string()));
    /// ```
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }

            let token = self.next_token()?;
            self.value_expected = matches!(
                token.kind,
                TokenKind::Colon | TokenKind::Gt | TokenKind::Lt | TokenKind::Ge | TokenKind::Le
            );
            tokens.push(token);
        }

        tokens.push(Token::new(TokenKind::Eof, self.position));
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token> {
        let start = self.position;
        let ch = self.current_char();

        let kind = match ch {
            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            '*' => {
                self.advance();
                TokenKind::Star
            }
            ':' => {
                self.advance();
                TokenKind::Colon
            }
            '>' => {
                self.advance();
                if self.peek_is('=') {
                    self.advance();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '<' => {
                self.advance();
                if self.peek_is('=') {
                    self.advance();
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '\'' | '"' => TokenKind::Value(self.read_quoted(start)?),
            c if self.value_expected && is_value_char(c) => TokenKind::Value(self.read_value()),
            c if c.is_alphabetic() || c == '_' => self.read_word(),
            c if c.is_ascii_digit() => TokenKind::Value(self.read_value()),
            _ => {
                return Err(Error::Lex {
                    ch,
                    position: start,
                })
            }
        };

        Ok(Token::new(kind, start))
    }

    // --- Navigation helpers ---

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek_is(&self, expected: char) -> bool {
        !self.is_at_end() && self.current_char() == expected
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    // --- Extraction logic ---

    /// Read a bare word and classify it as a keyword or an identifier.
    /// Keywords are matched case-sensitively: `and` is a field name.
    fn read_word(&mut self) -> TokenKind {
        let mut word = String::new();
        while !self.is_at_end()
            && (self.current_char().is_alphanumeric() || self.current_char() == '_')
        {
            word.push(self.current_char());
            self.advance();
        }

        match word.as_str() {
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            _ => TokenKind::Ident(word),
        }
    }

    /// Read an unquoted value word.
    fn read_value(&mut self) -> String {
        let mut value = String::new();
        while !self.is_at_end() && is_value_char(self.current_char()) {
            value.push(self.current_char());
            self.advance();
        }
        value
    }

    /// Read a quoted value literal, handling backslash escapes.
    fn read_quoted(&mut self, start: usize) -> Result<String> {
        let quote = self.current_char();
        self.advance();

        let mut value = String::new();
        while !self.is_at_end() {
            let ch = self.current_char();
            self.advance();

            if ch == quote {
                return Ok(value);
            }
            if ch == '\\' && !self.is_at_end() {
                let escaped = self.current_char();
                self.advance();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    _ => value.push(escaped),
                }
            } else {
                value.push(ch);
            }
        }

        Err(Error::syntax("unterminated string literal", start))
    }
}

/// Characters allowed in an unquoted value word.
fn is_value_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '@')
}

/// Recursive-descent parser building an [`Expr`] from a token sequence.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Create a new parser over a token sequence produced by [`Lexer`].
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the tokens into an expression tree.
    ///
    /// # Errors
    /// Returns [`Error::Syntax`] for an unexpected token, an unmatched
    /// parenthesis, a missing or non-numeric comparison value, a missing
    /// value after `:`, or trailing tokens after a complete expression.
    pub fn parse(&mut self) -> Result<Expr> {
        let expr = self.parse_or()?;

        let token = self.current_token();
        if token.kind != TokenKind::Eof {
            return Err(Error::syntax(
                format!("unexpected trailing {}", token.kind),
                token.position,
            ));
        }

        Ok(expr)
    }

    /// Parse OR expressions (left-associative).
    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;

        while self.match_kind(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    /// Parse AND expressions (left-associative).
    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_not()?;

        while self.match_kind(&TokenKind::And) {
            let right = self.parse_not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    /// Parse NOT expressions (right-recursive, `NOT NOT x` is legal).
    fn parse_not(&mut self) -> Result<Expr> {
        if self.match_kind(&TokenKind::Not) {
            let inner = self.parse_not()?;
            Ok(Expr::Not(Box::new(inner)))
        } else {
            self.parse_primary()
        }
    }

    /// Parse primary expressions: grouping, field match, comparison,
    /// wildcard.
    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.current_token().clone();

        match token.kind {
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_or()?;

                let closing = self.current_token();
                if closing.kind != TokenKind::RightParen {
                    return Err(Error::syntax(
                        format!("expected ')' to close group, found {}", closing.kind),
                        closing.position,
                    ));
                }
                self.advance();

                Ok(expr)
            }
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Wildcard)
            }
            TokenKind::Ident(field) => {
                self.advance();
                self.parse_field_term(field)
            }
            TokenKind::Eof => Err(Error::syntax(
                "unexpected end of input: expected an expression",
                token.position,
            )),
            other => Err(Error::syntax(
                format!("unexpected {}", other),
                token.position,
            )),
        }
    }

    /// Parse the remainder of a term that started with a field name:
    /// either `field:value` or `field <op> number`.
    fn parse_field_term(&mut self, field: String) -> Result<Expr> {
        let token = self.current_token().clone();

        match token.kind {
            TokenKind::Colon => {
                self.advance();
                let value = self.consume_value("expected value after ':'")?;
                Ok(Expr::Field { field, value })
            }
            TokenKind::Gt | TokenKind::Lt | TokenKind::Ge | TokenKind::Le => {
                let op = match token.kind {
                    TokenKind::Gt => CompareOp::Gt,
                    TokenKind::Lt => CompareOp::Lt,
                    TokenKind::Ge => CompareOp::Ge,
                    _ => CompareOp::Le,
                };
                self.advance();

                let value_position = self.current_token().position;
                let raw = self.consume_value("expected value after comparison operator")?;
                let value = raw.parse::<f64>().map_err(|_| {
                    Error::syntax(
                        format!("comparison against non-numeric value '{}'", raw),
                        value_position,
                    )
                })?;

                Ok(Expr::Comparison { field, op, value })
            }
            other => Err(Error::syntax(
                format!(
                    "expected ':' or a comparison operator after field '{}', found {}",
                    field, other
                ),
                token.position,
            )),
        }
    }

    // --- Helpers ---

    fn current_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn match_kind(&mut self, expected: &TokenKind) -> bool {
        if &self.current_token().kind == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_value(&mut self, message: &str) -> Result<String> {
        let token = self.current_token().clone();
        match token.kind {
            TokenKind::Value(text) => {
                self.advance();
                Ok(text)
            }
            other => Err(Error::syntax(
                format!("{}, found {}", message, other),
                token.position,
            )),
        }
    }
}
