//! Conversion of engine values to and from JSON

use serde_json::{Value, json};

use crate::ast::{Clause, Token};

/// Token sequence as a JSON array of tagged objects.
pub fn tokens_to_json(tokens: &[Token]) -> Result<Value, serde_json::Error> {
    serde_json::to_value(tokens)
}

/// Clause list as an array of arrays of literal texts.
pub fn clauses_to_json(clauses: &[Clause]) -> Value {
    Value::Array(clauses.iter().map(clause_to_json).collect())
}

pub fn clause_to_json(clause: &Clause) -> Value {
    json!(clause.texts())
}

/// Parse a JSON array of strings naming the literals that hold.
pub fn parse_truths(input: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(input)
}
