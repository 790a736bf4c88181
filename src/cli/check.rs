//! Run boolex commands against an expression

use std::collections::HashSet;

use serde_json::json;
use tracing::info;

use super::{
    CliError,
    convert::{clause_to_json, clauses_to_json, parse_truths, tokens_to_json},
};
use crate::{
    Grammar, Limits, Parser, check_token_list, dnf, evaluator::evaluate, lexer::tokenize,
    output::Printer,
};

/// What to do with the expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the token sequence
    Tokens,
    /// Validate and parse only
    Check,
    /// Print the DNF clause list; rendered in the grammar when `syntax`
    Dnf { syntax: bool },
    /// Print the factored expression
    Minimize,
    /// Evaluate with the given literals (display text) taken as true
    Eval { truths: Vec<String> },
}

/// Options for a single CLI run
#[derive(Debug, Clone)]
pub struct Options {
    pub expression: String,
    pub grammar: Grammar,
    pub command: Command,
    /// Bounds for parsing and clause expansion
    pub limits: Limits,
    /// JSON array of true literals, merged into `Command::Eval` truths
    pub input: Option<String>,
}

/// Result of a CLI run
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Json(serde_json::Value),
    Text(String),
}

/// Execute one command
pub fn execute(options: &Options) -> Result<Output, CliError> {
    let grammar = &options.grammar;
    let tokens = tokenize(grammar, &options.expression)?;

    if options.command == Command::Tokens {
        return Ok(Output::Json(tokens_to_json(&tokens)?));
    }

    check_token_list(&tokens)?;
    let expr = Parser::with_limits(tokens, options.limits).parse()?;
    info!(command = ?options.command, "expression parsed");

    match &options.command {
        Command::Tokens => unreachable!("handled before parsing"),
        Command::Check => Ok(Output::Text("Syntax is valid".to_string())),
        Command::Dnf { syntax } => {
            let clauses = dnf::to_clause_list_bounded(&expr, &options.limits)?;
            if *syntax {
                Ok(Output::Text(Printer::new(grammar).print_clauses(&clauses)))
            } else {
                Ok(Output::Json(clauses_to_json(&clauses)))
            }
        }
        Command::Minimize => {
            let minimized = dnf::minimize_dnf_bounded(&expr, &options.limits)?;
            Ok(Output::Text(Printer::new(grammar).print_expr(&minimized)))
        }
        Command::Eval { truths } => {
            let mut truths: HashSet<String> = truths.iter().cloned().collect();
            if let Some(input) = &options.input {
                truths.extend(parse_truths(input)?);
            }
            if truths.is_empty() && options.input.is_none() {
                return Err(CliError::NoInput);
            }

            let clauses = dnf::to_clause_list_bounded(&expr, &options.limits)?;
            let result = evaluate(&clauses, |token| truths.contains(&token.to_string()));
            Ok(Output::Json(json!({
                "satisfied": result.satisfied,
                "witness": result.witness.map(clause_to_json),
            })))
        }
    }
}
