// Compliance Tests
//
// Properties the engine guarantees: round-tripping through clause lists,
// the distribution law, evaluator correctness, injection locality, soundness
// of minimization, and the reference tokenization scenarios.

use std::collections::{HashMap, HashSet};

use boolex::ast::{BoolExpr, ClauseList, Token, TokenId};
use boolex::dnf::{
    build_expr_from_clause_list, inject_at, minimize_dnf, to_clause_list, to_dnf,
};
use boolex::evaluator::{evaluate, evaluate_expr};
use boolex::grammar::Grammar;
use boolex::lexer::{GrammarError, check_token_list, tokenize};
use boolex::parse_str;

fn parse(input: &str) -> BoolExpr {
    parse_str(&Grammar::default(), input).unwrap()
}

fn flat(expr: &BoolExpr) -> ClauseList {
    to_clause_list(&to_dnf(expr))
}

/// Clauses as a sorted multiset of sorted token-id multisets.
fn multiset(clauses: &ClauseList) -> Vec<Vec<TokenId>> {
    let mut out: Vec<Vec<TokenId>> = clauses
        .iter()
        .map(|clause| {
            let mut ids: Vec<TokenId> = clause.iter().filter_map(Token::id).collect();
            ids.sort();
            ids
        })
        .collect();
    out.sort();
    out
}

fn atoms(expr: &BoolExpr) -> Vec<TokenId> {
    let mut seen = HashSet::new();
    expr.literals()
        .into_iter()
        .filter_map(Token::id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Every assignment of truth values to the atoms of `expr`.
fn assignments(expr: &BoolExpr) -> Vec<HashMap<TokenId, bool>> {
    let ids = atoms(expr);
    (0u32..(1 << ids.len()))
        .map(|mask| {
            ids.iter()
                .enumerate()
                .map(|(i, id)| (*id, mask & (1 << i) != 0))
                .collect()
        })
        .collect()
}

fn sample_expressions() -> Vec<BoolExpr> {
    let mut exprs: Vec<BoolExpr> = [
        "a",
        "a && b",
        "a || b",
        "a && (b || c)",
        "(a || b) && (c || d)",
        "a || b && c || d",
        "(a && (b || c)) || (d && e)",
        "((a || b) && c) || (a && (d || e))",
        "(a || b) && (a || c) && (b || c)",
    ]
    .iter()
    .map(|s| parse(s))
    .collect();

    // Shared tokens, as produced by distribution and injection.
    let a = Token::variable("a", Vec::new());
    let b = Token::variable("b", Vec::new());
    let c = Token::variable("c", Vec::new());
    let v = |t: &Token| BoolExpr::Var(t.clone());
    exprs.push(BoolExpr::or(
        BoolExpr::and(v(&a), v(&b)),
        BoolExpr::and(v(&a), v(&c)),
    ));
    exprs.push(BoolExpr::or(v(&a), BoolExpr::and(v(&a), v(&b))));
    exprs.push(BoolExpr::and(
        BoolExpr::or(v(&a), v(&b)),
        BoolExpr::or(v(&a), v(&c)),
    ));
    exprs
}

// ============================================================================
// Round-trip
// ============================================================================

#[test]
fn test_round_trip_through_clause_list() {
    for expr in sample_expressions() {
        let clauses = flat(&expr);
        let rebuilt = build_expr_from_clause_list(&clauses);
        assert_eq!(multiset(&flat(&rebuilt)), multiset(&clauses), "Failed for: {}", expr);
    }
}

// ============================================================================
// Distribution law
// ============================================================================

#[test]
fn test_distribution_law() {
    let (a, b, c) = (
        Token::variable("a", Vec::new()),
        Token::variable("b", Vec::new()),
        Token::variable("c", Vec::new()),
    );
    let expr = BoolExpr::and(
        BoolExpr::Var(a.clone()),
        BoolExpr::or(BoolExpr::Var(b.clone()), BoolExpr::Var(c.clone())),
    );
    let expected = ClauseList::from(vec![vec![a.clone(), b], vec![a, c]]);
    assert_eq!(to_clause_list(&expr), expected);
    assert_eq!(flat(&expr), expected);
}

// ============================================================================
// Evaluator correctness
// ============================================================================

#[test]
fn test_evaluator_true_iff_some_clause_all_true() {
    for expr in sample_expressions() {
        let clauses = flat(&expr);
        for assignment in assignments(&expr) {
            let pred = |t: &Token| t.id().map(|id| assignment[&id]).unwrap_or(false);
            let expected = clauses.iter().any(|clause| clause.iter().all(pred));
            let result = evaluate(&clauses, pred);
            assert_eq!(result.satisfied, expected, "Failed for: {}", expr);
            if let Some(witness) = result.witness {
                assert!(witness.iter().all(pred));
            }
        }
    }
}

// ============================================================================
// Injection locality
// ============================================================================

#[test]
fn test_injection_locality() {
    let clauses = flat(&parse("a && b || c && d || e"));
    let replacement = parse("x && (y || z)");

    let result = inject_at(&clauses, 1, 0, &replacement).unwrap();
    let expansion = flat(&replacement);

    assert_eq!(result.len(), clauses.len() - 1 + expansion.len());
    assert_eq!(result[0], clauses[0]);
    assert_eq!(result[result.len() - 1], clauses[2]);

    for (i, inner) in expansion.iter().enumerate() {
        let mut expected = inner.to_vec();
        expected.push(clauses[1][1].clone());
        assert_eq!(result[1 + i].to_vec(), expected);
    }
}

// ============================================================================
// Minimize soundness
// ============================================================================

#[test]
fn test_minimize_is_equivalent() {
    for expr in sample_expressions() {
        let minimized = minimize_dnf(&expr);
        for assignment in assignments(&expr) {
            let pred = |t: &Token| t.id().map(|id| assignment[&id]).unwrap_or(false);
            assert_eq!(
                evaluate_expr(&expr, pred).satisfied,
                evaluate_expr(&minimized, pred).satisfied,
                "Failed for: {} minimized to {}",
                expr,
                minimized
            );
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_c_style_function_and_modifier() {
    let grammar = Grammar::c_style()
        .to_builder()
        .quote('\'')
        .modifiers(['!'])
        .build();
    let tokens = tokenize(&grammar, "a(7) && (!b || c)").unwrap();
    assert_eq!(tokens.len(), 7);

    let f = tokens[0].as_function().expect("function token");
    assert_eq!(f.name(), "a");
    assert_eq!(f.params(), &["7".to_string()]);
    assert_eq!(tokens[1], Token::And);
    assert_eq!(tokens[2], Token::OpenContainer);
    assert!(matches!(tokens[3], Token::Variable(_)));
    assert_eq!(tokens[3].value(), Some("b"));
    assert_eq!(tokens[3].modifiers(), &['!']);
    assert_eq!(tokens[4], Token::Or);
    assert_eq!(tokens[5].value(), Some("c"));
    assert_eq!(tokens[6], Token::CloseContainer);

    let expr = boolex::Parser::new(tokens).parse().unwrap();
    let clauses = flat(&expr);
    let values: Vec<Vec<&str>> = clauses
        .iter()
        .map(|clause| clause.iter().filter_map(Token::value).collect())
        .collect();
    assert_eq!(values, vec![vec!["a(7)", "b"], vec!["a(7)", "c"]]);
}

#[test]
fn test_scenario_matlab_style() {
    let grammar = Grammar::matlab_style();
    let tokens = tokenize(&grammar, "/t|(/c&#lake)").unwrap();
    let shown: Vec<String> = tokens.iter().map(Token::to_string).collect();
    assert_eq!(shown, vec!["/t", "OR", "(", "/c", "AND", "#lake", ")"]);

    let expr = boolex::Parser::new(tokens).parse().unwrap();
    assert_eq!(flat(&expr).texts(), vec![vec!["/t"], vec!["/c", "#lake"]]);
}

#[test]
fn test_scenario_consecutive_operators_rejected() {
    let tokens = tokenize(&Grammar::default(), "a && || b").unwrap();
    assert_eq!(
        check_token_list(&tokens),
        Err(GrammarError::ConsecutiveOperators { index: 2 })
    );
}
