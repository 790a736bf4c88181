//! boolex: a configurable boolean-expression engine.
//!
//! Requirement formulas such as `has(surf) && (badge || 'Ice Beam')` are
//! tokenized under a caller-defined [`Grammar`], parsed into a [`BoolExpr`],
//! converted to Disjunctive Normal Form and evaluated against a predicate
//! that decides each literal.
//!
//! ```
//! use boolex::{dnf, evaluator::evaluate, parse_str, Grammar};
//!
//! let grammar = Grammar::builder().modifiers(['!']).build();
//! let expr = parse_str(&grammar, "a(7) && (!b || c)").unwrap();
//! let clauses = dnf::to_clause_list(&dnf::to_dnf(&expr));
//! assert_eq!(clauses.texts(), vec![vec!["a(7)", "!b"], vec!["a(7)", "c"]]);
//!
//! let result = evaluate(&clauses, |t| t.value() != Some("b"));
//! assert!(result.satisfied);
//! ```
#[cfg(feature = "cli")]
pub mod cli;
pub mod ast;
pub mod dnf;
pub mod evaluator;
pub mod grammar;
pub mod lexer;
pub mod limits;
pub mod output;
pub mod parser;

use thiserror::Error;

pub use ast::{BoolExpr, Clause, ClauseList, Token, TokenId};
pub use dnf::ClauseError;
pub use evaluator::{Evaluation, evaluate, evaluate_expr, try_evaluate};
pub use grammar::{Grammar, GrammarBuilder, Style};
pub use lexer::{GrammarError, LexError, Lexer, check_token_list};
pub use limits::Limits;
pub use output::{Printer, to_syntax};
pub use parser::{ParseError, Parser};

/// Any error the text-to-expression pipeline can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("clause error: {0}")]
    Clause(#[from] ClauseError),
}

/// Tokenize and parse `input` with default [`Limits`].
pub fn parse_str(grammar: &Grammar, input: &str) -> Result<BoolExpr, Error> {
    parse_str_with_limits(grammar, input, Limits::default())
}

/// Tokenize, validate and parse `input`.
///
/// Unlike [`parse_str`] this runs [`check_token_list`] before parsing, so
/// malformed sequences are reported with the offending token index.
pub fn parse_checked(grammar: &Grammar, input: &str) -> Result<BoolExpr, Error> {
    let tokens = lexer::tokenize(grammar, input)?;
    check_token_list(&tokens)?;
    Ok(Parser::new(tokens).parse()?)
}

pub fn parse_str_with_limits(grammar: &Grammar, input: &str, limits: Limits) -> Result<BoolExpr, Error> {
    let tokens = lexer::tokenize(grammar, input)?;
    Ok(Parser::with_limits(tokens, limits).parse()?)
}
