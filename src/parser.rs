use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{BoolExpr, Token},
    limits::Limits,
};

/// Errors raised while building a [`BoolExpr`] from tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token sequence ended in the middle of an expression.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A group was opened but the matching close container is missing.
    #[error("expected closing container at token {index}")]
    ExpectedClose { index: usize },

    /// An operator or close container where a literal or group was expected.
    #[error("unexpected token {found} at token {index}")]
    UnexpectedToken { index: usize, found: String },

    /// A complete expression was followed by more tokens.
    #[error("unexpected trailing token {found} at token {index}")]
    UnexpectedTrailingToken { index: usize, found: String },

    #[error("maximum nesting depth exceeded ({0})")]
    MaxDepthExceeded(usize),
}

/// Recursive-descent parser over a token sequence.
///
/// Precedence from lowest to highest: OR, AND, containers. Both operators are
/// left-associative.
///
/// `Limits::max_depth` counts open containers only; a long operator chain
/// still yields a tree as tall as the chain is long.
pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    limits: Limits,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_limits(tokens, Limits::default())
    }

    pub fn with_limits(tokens: Vec<Token>, limits: Limits) -> Self {
        Parser {
            tokens,
            cursor: 0,
            depth: 0,
            limits,
        }
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }

    fn check(&self, token: &Token) -> bool {
        self.current_token() == Some(token)
    }

    /// Parse primary expressions: a literal or a contained group
    fn parse_primary(&mut self) -> Result<BoolExpr, ParseError> {
        let index = self.cursor;
        match self.current_token() {
            None => Err(ParseError::UnexpectedEndOfInput),
            Some(Token::OpenContainer) => {
                if self.depth >= self.limits.max_depth {
                    return Err(ParseError::MaxDepthExceeded(self.limits.max_depth));
                }
                self.advance();
                self.depth += 1;
                let expr = self.parse_or()?;
                self.depth -= 1;

                if !self.check(&Token::CloseContainer) {
                    return Err(ParseError::ExpectedClose { index: self.cursor });
                }
                self.advance();
                Ok(expr)
            }
            Some(token) if token.is_literal() => {
                let token = token.clone();
                self.advance();
                Ok(BoolExpr::Var(token))
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                index,
                found: token.to_string(),
            }),
        }
    }

    fn parse_and(&mut self) -> Result<BoolExpr, ParseError> {
        let mut left = self.parse_primary()?;

        while self.check(&Token::And) {
            self.advance();
            let right = self.parse_primary()?;
            left = BoolExpr::and(left, right);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<BoolExpr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = BoolExpr::or(left, right);
        }
        Ok(left)
    }

    /// Parse the whole token sequence as one expression.
    pub fn parse(&mut self) -> Result<BoolExpr, ParseError> {
        let expr = self.parse_or()?;

        if let Some(token) = self.current_token() {
            return Err(ParseError::UnexpectedTrailingToken {
                index: self.cursor,
                found: token.to_string(),
            });
        }

        debug!(tokens = self.tokens.len(), depth = expr.depth(), "parsed expression");
        Ok(expr)
    }
}
