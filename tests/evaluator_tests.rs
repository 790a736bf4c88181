// tests/evaluator_tests.rs

use std::cell::RefCell;
use std::collections::HashSet;

use boolex::ast::{BoolExpr, ClauseList, Token};
use boolex::dnf::{to_clause_list, to_dnf};
use boolex::evaluator::{evaluate, evaluate_expr, try_evaluate};
use boolex::grammar::Grammar;
use boolex::parse_str;

fn grammar() -> Grammar {
    Grammar::builder().modifiers(['!']).build()
}

fn parse(input: &str) -> BoolExpr {
    parse_str(&grammar(), input).unwrap()
}

fn clauses_of(input: &str) -> ClauseList {
    to_clause_list(&to_dnf(&parse(input)))
}

/// Literal holds when its value is owned, inverted by a `!` modifier.
fn owns<'a>(owned: &'a [&'a str]) -> impl FnMut(&Token) -> bool + 'a {
    move |token: &Token| {
        let has = owned.contains(&token.value().unwrap_or_default());
        if token.modifiers().contains(&'!') { !has } else { has }
    }
}

// ============================================================================
// Clause lists
// ============================================================================

#[test]
fn test_first_satisfied_clause_is_witness() {
    let clauses = clauses_of("surf && (strength || flash)");
    let result = evaluate(&clauses, owns(&["surf", "strength", "flash"]));
    assert!(result.satisfied);
    assert_eq!(result.witness.unwrap().texts(), vec!["surf", "strength"]);
}

#[test]
fn test_later_clause_is_witness() {
    let clauses = clauses_of("surf && (strength || flash)");
    let result = evaluate(&clauses, owns(&["surf", "flash"]));
    assert_eq!(result.witness.unwrap().texts(), vec!["surf", "flash"]);
}

#[test]
fn test_unsatisfied() {
    let clauses = clauses_of("surf && (strength || flash)");
    let result = evaluate(&clauses, owns(&["strength", "flash"]));
    assert!(!result.satisfied);
    assert!(result.witness.is_none());
}

#[test]
fn test_modifiers_are_left_to_the_predicate() {
    let clauses = clauses_of("!lake");
    assert!(evaluate(&clauses, owns(&[])).satisfied);
    assert!(!evaluate(&clauses, owns(&["lake"])).satisfied);
    // A predicate that ignores modifiers sees a plain `lake`.
    assert!(evaluate(&clauses, |t| t.value() == Some("lake")).satisfied);
}

#[test]
fn test_predicate_order_is_left_to_right() {
    let clauses = clauses_of("a && b || c && d");
    let seen = RefCell::new(Vec::new());
    let result = evaluate(&clauses, |t| {
        seen.borrow_mut().push(t.to_string());
        t.value() != Some("a")
    });
    assert!(result.satisfied);
    assert_eq!(*seen.borrow(), vec!["a", "c", "d"]);
}

#[test]
fn test_function_literals_reach_predicate() {
    let clauses = clauses_of("count(badge, 8) && route");
    let result = evaluate(&clauses, |t| match t.as_function() {
        Some(f) => f.name() == "count" && f.params()[1].parse::<u32>().unwrap() <= 8,
        None => true,
    });
    assert!(result.satisfied);
}

#[test]
fn test_try_evaluate_stops_on_error() {
    let clauses = clauses_of("a || b || c");
    let mut asked = 0;
    let result: Result<_, String> = try_evaluate(&clauses, |t| {
        asked += 1;
        match t.value() {
            Some("b") => Err("b unavailable".to_string()),
            _ => Ok(false),
        }
    });
    assert_eq!(result.unwrap_err(), "b unavailable");
    assert_eq!(asked, 2);
}

#[test]
fn test_try_evaluate_success() {
    let clauses = clauses_of("a || b");
    let result = try_evaluate::<_, ()>(&clauses, |t| Ok(t.value() == Some("b"))).unwrap();
    assert!(result.satisfied);
    assert_eq!(result.witness.unwrap().texts(), vec!["b"]);
}

// ============================================================================
// Expression trees
// ============================================================================

#[test]
fn test_expr_evaluation_matches_clause_evaluation() {
    let inputs = [
        "a && (b || c)",
        "(a || b) && (c || d)",
        "a || b && c || d",
        "(a && (b || (c && d))) || e",
    ];
    let universe = ["a", "b", "c", "d", "e"];

    for input in inputs {
        let expr = parse(input);
        let clauses = to_clause_list(&to_dnf(&expr));
        for mask in 0u32..(1 << universe.len()) {
            let owned: HashSet<&str> = universe
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, v)| *v)
                .collect();
            let pred = |t: &Token| owned.contains(t.value().unwrap_or_default());
            assert_eq!(
                evaluate_expr(&expr, pred).satisfied,
                evaluate(&clauses, pred).satisfied,
                "Failed for input: {} with {:?}",
                input,
                owned
            );
        }
    }
}

#[test]
fn test_expr_witness_is_top_level_candidate() {
    let expr = parse("a && b || c");
    let result = evaluate_expr(&expr, |t| t.value() == Some("c"));
    assert!(result.satisfied);
    assert_eq!(result.witness.unwrap().to_string(), "c");
}
