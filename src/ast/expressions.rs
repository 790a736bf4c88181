use std::fmt;

use crate::{ast::Token, grammar::Grammar, output::Printer};

/// Boolean abstract syntax tree.
///
/// Binary and immutable; algebra operations build new trees rather than
/// editing existing ones. Each `Var` owns exactly one literal token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolExpr {
    /// Literal leaf
    ///
    /// # Example
    /// ```text
    /// has(surf)
    /// ```
    Var(Token),

    /// Conjunction
    ///
    /// # Example
    /// ```text
    /// a && b
    /// ```
    And(Box<BoolExpr>, Box<BoolExpr>),

    /// Disjunction
    ///
    /// # Example
    /// ```text
    /// a || b
    /// ```
    Or(Box<BoolExpr>, Box<BoolExpr>),
}

impl BoolExpr {
    pub fn var(token: Token) -> Self {
        BoolExpr::Var(token)
    }

    pub fn and(left: BoolExpr, right: BoolExpr) -> Self {
        BoolExpr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: BoolExpr, right: BoolExpr) -> Self {
        BoolExpr::Or(Box::new(left), Box::new(right))
    }

    pub fn is_var(&self) -> bool {
        matches!(self, BoolExpr::Var(_))
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            BoolExpr::Var(token) => Some(token),
            _ => None,
        }
    }

    /// All literal tokens, left to right.
    pub fn literals(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                BoolExpr::Var(token) => out.push(token),
                BoolExpr::And(l, r) | BoolExpr::Or(l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
            }
        }
        out
    }

    /// Nesting depth; a single literal has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            BoolExpr::Var(_) => 1,
            BoolExpr::And(l, r) | BoolExpr::Or(l, r) => 1 + l.depth().max(r.depth()),
        }
    }
}

impl From<Token> for BoolExpr {
    fn from(token: Token) -> Self {
        BoolExpr::Var(token)
    }
}

impl fmt::Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grammar = Grammar::c_style();
        f.write_str(&Printer::new(&grammar).print_expr(self))
    }
}
