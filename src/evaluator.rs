use tracing::trace;

use crate::ast::{BoolExpr, Clause, ClauseList, Token};

/// Result of evaluating a DNF against a literal predicate.
///
/// `witness` is the first clause (or clause expression) that was satisfied.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a, W> {
    pub satisfied: bool,
    pub witness: Option<&'a W>,
}

impl<'a, W> Evaluation<'a, W> {
    fn satisfied_by(witness: &'a W) -> Self {
        Evaluation {
            satisfied: true,
            witness: Some(witness),
        }
    }

    fn unsatisfied() -> Self {
        Evaluation {
            satisfied: false,
            witness: None,
        }
    }
}

fn check_literal<F>(token: &Token, predicate: &mut F) -> bool
where
    F: FnMut(&Token) -> bool,
{
    token.is_truth() || predicate(token)
}

/// Evaluate a clause list.
///
/// Clauses are tried in order and tokens within a clause left to right; a
/// clause stops at its first false literal and evaluation stops at the first
/// satisfied clause. The predicate is never called for the truth sentinel.
///
/// # Examples
///
/// ```
/// use boolex::{dnf, evaluator::evaluate, parse_str, Grammar};
///
/// let grammar = Grammar::default();
/// let expr = parse_str(&grammar, "surf && (strength || flash)").unwrap();
/// let clauses = dnf::to_clause_list(&dnf::to_dnf(&expr));
///
/// let owned = ["surf", "flash"];
/// let result = evaluate(&clauses, |t| owned.contains(&t.value().unwrap_or_default()));
/// assert!(result.satisfied);
/// assert_eq!(result.witness.unwrap().texts(), vec!["surf", "flash"]);
/// ```
pub fn evaluate<F>(clauses: &ClauseList, mut predicate: F) -> Evaluation<'_, Clause>
where
    F: FnMut(&Token) -> bool,
{
    for clause in clauses {
        if clause.iter().all(|token| check_literal(token, &mut predicate)) {
            trace!(witness = %clause, "clause satisfied");
            return Evaluation::satisfied_by(clause);
        }
    }
    Evaluation::unsatisfied()
}

/// [`evaluate`] with a fallible predicate. The first error aborts.
pub fn try_evaluate<F, E>(clauses: &ClauseList, mut predicate: F) -> Result<Evaluation<'_, Clause>, E>
where
    F: FnMut(&Token) -> Result<bool, E>,
{
    'clauses: for clause in clauses {
        for token in clause {
            if !token.is_truth() && !predicate(token)? {
                continue 'clauses;
            }
        }
        trace!(witness = %clause, "clause satisfied");
        return Ok(Evaluation::satisfied_by(clause));
    }
    Ok(Evaluation::unsatisfied())
}

/// Split the top-level OR chain into candidate clause expressions.
fn top_level_clauses(expr: &BoolExpr) -> Vec<&BoolExpr> {
    let mut candidates = Vec::new();
    let mut stack = vec![expr];
    while let Some(node) = stack.pop() {
        match node {
            BoolExpr::Or(left, right) => {
                stack.push(right);
                stack.push(left);
            }
            other => candidates.push(other),
        }
    }
    candidates
}

fn eval_node<F>(expr: &BoolExpr, predicate: &mut F) -> bool
where
    F: FnMut(&Token) -> bool,
{
    match expr {
        BoolExpr::Var(token) => check_literal(token, predicate),
        BoolExpr::And(left, right) => eval_node(left, predicate) && eval_node(right, predicate),
        BoolExpr::Or(left, right) => eval_node(left, predicate) || eval_node(right, predicate),
    }
}

/// Evaluate an expression tree directly.
///
/// Only the top-level OR chain is flattened into candidates; each candidate
/// is then evaluated recursively, so the input does not have to be fully
/// distributed. The witness is the satisfied candidate subtree.
pub fn evaluate_expr<F>(expr: &BoolExpr, mut predicate: F) -> Evaluation<'_, BoolExpr>
where
    F: FnMut(&Token) -> bool,
{
    for candidate in top_level_clauses(expr) {
        if eval_node(candidate, &mut predicate) {
            trace!(witness = %candidate, "candidate satisfied");
            return Evaluation::satisfied_by(candidate);
        }
    }
    Evaluation::unsatisfied()
}
