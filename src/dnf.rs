//! Disjunctive Normal Form and clause-level algebra.
//!
//! Two representations are used side by side:
//!
//! - a **DNF tree**: a [`BoolExpr`] where no `Or` sits below an `And`;
//! - a **clause list**: the same formula flattened into a [`ClauseList`].
//!
//! [`to_dnf`] and [`to_clause_list`] move from an arbitrary expression to the
//! flattened form, [`build_expr_from_clause_list`] goes back. Everything else
//! in this module is a composition of those primitives.
//!
//! No deduplication or tautology removal happens anywhere here; duplicate or
//! redundant clauses are kept. [`minimize_dnf`] performs one greedy
//! common-factor extraction and nothing more: clauses that only partially
//! overlap are never merged.
//!
//! Literal tokens are compared by identity, so two `a` literals parsed from
//! different positions are different atoms for factoring and injection.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{BoolExpr, Clause, ClauseList, Token},
    limits::Limits,
};

/// Errors raised by clause-list editing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClauseError {
    #[error("clause index {index} out of range ({len} clauses)")]
    ClauseIndexOutOfRange { index: usize, len: usize },

    #[error("token index {index} out of range in clause {clause} ({len} tokens)")]
    TokenIndexOutOfRange {
        clause: usize,
        index: usize,
        len: usize,
    },

    /// The token to replace does not occur in any clause.
    #[error("token {0} not found in any clause")]
    TokenNotFound(String),

    #[error("maximum clause count exceeded ({0})")]
    MaxClausesExceeded(usize),
}

/// Convert an expression to a DNF tree by distributing AND over OR.
pub fn to_dnf(expr: &BoolExpr) -> BoolExpr {
    match expr {
        BoolExpr::Var(_) => expr.clone(),
        BoolExpr::And(left, right) => distribute(to_dnf(left), to_dnf(right)),
        BoolExpr::Or(left, right) => BoolExpr::or(to_dnf(left), to_dnf(right)),
    }
}

/// Number of clauses `expr` flattens to, computed without expanding it.
///
/// Fails as soon as any subexpression would exceed `max_clauses`.
pub fn clause_count(expr: &BoolExpr, max_clauses: usize) -> Result<usize, ClauseError> {
    let count = match expr {
        BoolExpr::Var(_) => 1,
        BoolExpr::And(left, right) => {
            clause_count(left, max_clauses)?.saturating_mul(clause_count(right, max_clauses)?)
        }
        BoolExpr::Or(left, right) => {
            clause_count(left, max_clauses)?.saturating_add(clause_count(right, max_clauses)?)
        }
    };

    if count > max_clauses {
        return Err(ClauseError::MaxClausesExceeded(max_clauses));
    }
    Ok(count)
}

/// [`to_dnf`] that refuses expressions whose DNF would hold more than
/// `limits.max_clauses` clauses. The check runs before any distribution.
pub fn to_dnf_bounded(expr: &BoolExpr, limits: &Limits) -> Result<BoolExpr, ClauseError> {
    let clauses = clause_count(expr, limits.max_clauses)?;
    trace!(clauses, "dnf size within limits");
    Ok(to_dnf(expr))
}

/// `left AND right`, pushed below any top-level OR on either side.
pub fn distribute(left: BoolExpr, right: BoolExpr) -> BoolExpr {
    match (left, right) {
        (BoolExpr::Or(a, b), right) => {
            BoolExpr::or(distribute(*a, right.clone()), distribute(*b, right))
        }
        (left, BoolExpr::Or(a, b)) => {
            BoolExpr::or(distribute(left.clone(), *a), distribute(left, *b))
        }
        (left, right) => BoolExpr::and(left, right),
    }
}

fn flatten(expr: &BoolExpr, max_clauses: usize) -> Result<Vec<Clause>, ClauseError> {
    let clauses = match expr {
        BoolExpr::Var(token) => vec![Clause::from(vec![token.clone()])],
        BoolExpr::And(left, right) => {
            let left = flatten(left, max_clauses)?;
            let right = flatten(right, max_clauses)?;

            if left.len().saturating_mul(right.len()) > max_clauses {
                return Err(ClauseError::MaxClausesExceeded(max_clauses));
            }

            let mut product: Vec<Clause> = Vec::with_capacity(left.len() * right.len());
            for l in &left {
                for r in &right {
                    product.push(l.iter().chain(r.iter()).cloned().collect());
                }
            }
            product
        }
        BoolExpr::Or(left, right) => {
            let mut clauses = flatten(left, max_clauses)?;
            clauses.extend(flatten(right, max_clauses)?);
            clauses
        }
    };

    if clauses.len() > max_clauses {
        return Err(ClauseError::MaxClausesExceeded(max_clauses));
    }
    Ok(clauses)
}

/// Flatten an expression into clauses.
///
/// Meant for DNF trees, but any expression works: `And` takes the Cartesian
/// product of both sides' clauses (left tokens first), `Or` concatenates.
pub fn to_clause_list(expr: &BoolExpr) -> ClauseList {
    match flatten(expr, usize::MAX) {
        Ok(clauses) => ClauseList::from(clauses),
        Err(_) => unreachable!("unbounded flattening has no clause limit"),
    }
}

/// [`to_clause_list`] that fails once any intermediate list grows past
/// `limits.max_clauses`.
pub fn to_clause_list_bounded(expr: &BoolExpr, limits: &Limits) -> Result<ClauseList, ClauseError> {
    clause_count(expr, limits.max_clauses)?;
    flatten(expr, limits.max_clauses).map(ClauseList::from)
}

fn and_chain<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> BoolExpr {
    tokens
        .into_iter()
        .map(|t| BoolExpr::Var(t.clone()))
        .reduce(BoolExpr::and)
        .unwrap_or_else(|| BoolExpr::Var(Token::truth()))
}

/// Rebuild an expression: each clause becomes a left-associated AND chain,
/// the clauses a left-associated OR chain. No clauses means truth.
pub fn build_expr_from_clause_list(clauses: &[Clause]) -> BoolExpr {
    clauses
        .iter()
        .map(|clause| and_chain(clause.iter()))
        .reduce(BoolExpr::or)
        .unwrap_or_else(|| BoolExpr::Var(Token::truth()))
}

/// Replace the token at `(clause_index, token_index)` with `replacement`.
///
/// The target clause is split around the position; for each clause of the
/// replacement's own DNF a new clause `prefix + replacement clause + suffix`
/// is generated. Those clauses take the target clause's slot, every other
/// clause is left untouched and in place.
pub fn inject_at(
    clauses: &ClauseList,
    clause_index: usize,
    token_index: usize,
    replacement: &BoolExpr,
) -> Result<ClauseList, ClauseError> {
    let target = clauses
        .get(clause_index)
        .ok_or(ClauseError::ClauseIndexOutOfRange {
            index: clause_index,
            len: clauses.len(),
        })?;

    if token_index >= target.len() {
        return Err(ClauseError::TokenIndexOutOfRange {
            clause: clause_index,
            index: token_index,
            len: target.len(),
        });
    }

    let prefix = &target[..token_index];
    let suffix = &target[token_index + 1..];
    let expansion = to_clause_list(&to_dnf(replacement));
    trace!(
        clause = clause_index,
        token = token_index,
        generated = expansion.len(),
        "inject subexpression"
    );

    let mut result: Vec<Clause> = Vec::with_capacity(clauses.len() + expansion.len());
    result.extend(clauses[..clause_index].iter().cloned());
    for inner in &expansion {
        let clause: Clause = prefix
            .iter()
            .chain(inner.iter())
            .chain(suffix.iter())
            .cloned()
            .collect();
        result.push(clause);
    }
    result.extend(clauses[clause_index + 1..].iter().cloned());

    Ok(ClauseList::from(result))
}

/// Locate the first occurrence of `target` (by identity) and replace it
/// with `replacement`, see [`inject_at`].
pub fn inject_for(
    clauses: &ClauseList,
    target: &Token,
    replacement: &BoolExpr,
) -> Result<ClauseList, ClauseError> {
    let (clause_index, token_index) = clauses
        .iter()
        .enumerate()
        .find_map(|(ci, clause)| clause.iter().position(|t| t == target).map(|ti| (ci, ti)))
        .ok_or_else(|| ClauseError::TokenNotFound(target.to_string()))?;

    inject_at(clauses, clause_index, token_index, replacement)
}

/// Expression-level [`inject_for`]: flatten, inject, rebuild.
pub fn inject_expr_for(
    expr: &BoolExpr,
    target: &Token,
    replacement: &BoolExpr,
) -> Result<BoolExpr, ClauseError> {
    let clauses = to_clause_list(&to_dnf(expr));
    let injected = inject_for(&clauses, target, replacement)?;
    Ok(build_expr_from_clause_list(&injected))
}

/// Pull the literals shared by every clause out in front.
///
/// Returns `common AND (rest_1 OR rest_2 ...)`. When some clause consists of
/// nothing but common literals it absorbs the rest and only `common` is
/// returned. Without common literals the rebuilt DNF is returned as is.
pub fn minimize_dnf(expr: &BoolExpr) -> BoolExpr {
    factor_common(&to_clause_list(&to_dnf(expr)))
}

/// [`minimize_dnf`] with the clause expansion bounded by `limits`.
pub fn minimize_dnf_bounded(expr: &BoolExpr, limits: &Limits) -> Result<BoolExpr, ClauseError> {
    Ok(factor_common(&to_clause_list_bounded(expr, limits)?))
}

fn factor_common(clauses: &ClauseList) -> BoolExpr {
    let Some((first, rest)) = clauses.split_first() else {
        return build_expr_from_clause_list(clauses);
    };

    let mut seen = HashSet::new();
    let common: Vec<&Token> = first
        .iter()
        .filter(|t| rest.iter().all(|clause| clause.contains(*t)))
        .filter(|t| seen.insert(*t))
        .collect();

    if common.is_empty() {
        return build_expr_from_clause_list(clauses);
    }

    let factor = and_chain(common.iter().copied());
    let remainder: Vec<Clause> = clauses
        .iter()
        .map(|clause| clause.iter().filter(|t| !seen.contains(t)).cloned().collect())
        .collect();

    debug!(
        clauses = clauses.len(),
        common = common.len(),
        "minimized dnf"
    );

    if remainder.iter().any(|clause: &Clause| clause.is_empty()) {
        return factor;
    }
    BoolExpr::and(factor, build_expr_from_clause_list(&remainder))
}

/// `left AND right` over clause lists, re-normalized to DNF clauses.
///
/// An empty operand is rebuilt as the truth literal, so it contributes a
/// `[true]` clause. [`evaluate`](crate::evaluator::evaluate) on an empty list
/// itself yields false.
pub fn combine_with_and(left: &ClauseList, right: &ClauseList) -> ClauseList {
    let expr = BoolExpr::and(
        build_expr_from_clause_list(left),
        build_expr_from_clause_list(right),
    );
    to_clause_list(&to_dnf(&expr))
}

/// `left OR right` over clause lists, re-normalized to DNF clauses.
///
/// As with [`combine_with_and`], an empty operand counts as truth.
pub fn combine_with_or(left: &ClauseList, right: &ClauseList) -> ClauseList {
    let expr = BoolExpr::or(
        build_expr_from_clause_list(left),
        build_expr_from_clause_list(right),
    );
    to_clause_list(&to_dnf(&expr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Token {
        Token::variable(name, Vec::new())
    }

    fn leaf(token: &Token) -> BoolExpr {
        BoolExpr::Var(token.clone())
    }

    #[test]
    fn test_distribute_left_or() {
        let (a, b, c) = (var("a"), var("b"), var("c"));
        let expr = distribute(BoolExpr::or(leaf(&a), leaf(&b)), leaf(&c));
        let clauses = to_clause_list(&expr);
        assert_eq!(clauses.texts(), vec![vec!["a", "c"], vec!["b", "c"]]);
    }

    #[test]
    fn test_to_dnf_has_no_or_under_and() {
        fn or_below_and(expr: &BoolExpr, under_and: bool) -> bool {
            match expr {
                BoolExpr::Var(_) => false,
                BoolExpr::Or(l, r) => under_and || or_below_and(l, false) || or_below_and(r, false),
                BoolExpr::And(l, r) => or_below_and(l, true) || or_below_and(r, true),
            }
        }

        let (a, b, c, d) = (var("a"), var("b"), var("c"), var("d"));
        let expr = BoolExpr::and(
            BoolExpr::or(leaf(&a), leaf(&b)),
            BoolExpr::or(leaf(&c), BoolExpr::and(leaf(&d), leaf(&a))),
        );
        let dnf = to_dnf(&expr);
        assert!(!or_below_and(&dnf, false));
        assert_eq!(to_clause_list(&dnf).len(), 4);
    }

    #[test]
    fn test_bounded_flatten_fails_past_limit() {
        let pair = |x: &str, y: &str| BoolExpr::or(leaf(&var(x)), leaf(&var(y)));
        let expr = BoolExpr::and(BoolExpr::and(pair("a", "b"), pair("c", "d")), pair("e", "f"));
        let limits = Limits::new(8, 4);
        assert_eq!(
            to_clause_list_bounded(&expr, &limits),
            Err(ClauseError::MaxClausesExceeded(4))
        );
        assert_eq!(to_clause_list_bounded(&expr, &Limits::default()).unwrap().len(), 8);
    }

    fn groups(n: usize) -> BoolExpr {
        (0..n)
            .map(|i| BoolExpr::or(leaf(&var(&format!("a{i}"))), leaf(&var(&format!("b{i}")))))
            .reduce(BoolExpr::and)
            .unwrap()
    }

    #[test]
    fn test_clause_count_matches_flattening() {
        let expr = groups(3);
        assert_eq!(clause_count(&expr, usize::MAX), Ok(8));
        assert_eq!(to_clause_list(&expr).len(), 8);
    }

    #[test]
    fn test_bounded_dnf_rejects_before_expanding() {
        // 2^64 clauses: only a check that runs ahead of distribution returns.
        let expr = groups(64);
        assert_eq!(
            to_dnf_bounded(&expr, &Limits::strict()),
            Err(ClauseError::MaxClausesExceeded(1024))
        );
        assert_eq!(
            to_clause_list_bounded(&expr, &Limits::permissive()),
            Err(ClauseError::MaxClausesExceeded(1 << 22))
        );
        assert_eq!(
            minimize_dnf_bounded(&expr, &Limits::strict()),
            Err(ClauseError::MaxClausesExceeded(1024))
        );
    }

    #[test]
    fn test_bounded_dnf_within_limits() {
        let expr = groups(3);
        assert_eq!(to_dnf_bounded(&expr, &Limits::strict()), Ok(to_dnf(&expr)));
    }

    #[test]
    fn test_build_empty_is_truth() {
        let expr = build_expr_from_clause_list(&[]);
        assert!(matches!(expr, BoolExpr::Var(ref t) if t.is_truth()));
    }

    #[test]
    fn test_minimize_absorbs_subsumed_clause() {
        let (a, b) = (var("a"), var("b"));
        let expr = BoolExpr::or(leaf(&a), BoolExpr::and(leaf(&a), leaf(&b)));
        assert_eq!(minimize_dnf(&expr), leaf(&a));
    }

    #[test]
    fn test_minimize_without_common_factor_is_rebuilt_dnf() {
        let (a, b, c) = (var("a"), var("b"), var("c"));
        let expr = BoolExpr::or(leaf(&a), BoolExpr::and(leaf(&b), leaf(&c)));
        assert_eq!(minimize_dnf(&expr), expr);
    }
}
