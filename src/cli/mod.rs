//! CLI support for boolex
//!
//! Provides programmatic access to the `boolex` command-line functionality so
//! other tools can embed it without spawning a process.

mod check;
mod convert;
mod docs;

pub use check::{Command, Options, Output, execute};
pub use convert::{clauses_to_json, parse_truths, tokens_to_json};
pub use docs::get_styles_overview;

use std::io;

use thiserror::Error;

use crate::grammar::{Grammar, Style};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] crate::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --true, --input or pipe a JSON array to stdin.")]
    NoInput,

    #[error("Unknown style: '{0}'\nRun 'boolex styles' to see available styles.")]
    UnknownStyle(String),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Engine(e.into())
    }
}

impl From<crate::GrammarError> for CliError {
    fn from(e: crate::GrammarError) -> Self {
        CliError::Engine(e.into())
    }
}

impl From<crate::ClauseError> for CliError {
    fn from(e: crate::ClauseError) -> Self {
        CliError::Engine(e.into())
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Engine(e.into())
    }
}

/// Build the grammar selected on the command line.
///
/// A grammar file (JSON, missing fields default) wins over a style name;
/// `modifiers`, when given, replaces the modifier set of either.
pub fn resolve_grammar(
    style: Option<&str>,
    grammar_json: Option<&str>,
    modifiers: Option<&str>,
) -> Result<Grammar, CliError> {
    let grammar = match (grammar_json, style) {
        (Some(json), _) => serde_json::from_str::<Grammar>(json)?,
        (None, Some(name)) => name
            .parse::<Style>()
            .map_err(CliError::UnknownStyle)?
            .grammar(),
        (None, None) => Grammar::default(),
    };

    Ok(match modifiers {
        Some(chars) => grammar.to_builder().modifiers(chars.chars()).build(),
        None => grammar,
    })
}
