//! Rendering of tokens, expressions and clause lists back into a grammar's
//! surface syntax.
//!
//! # Features
//!
//! - **Grammar aware** - operators, containers and quotes come from the
//!   [`Grammar`] the printer was built with
//! - **Minimal containers** - only an OR below an AND, or a right-nested
//!   chain of the same operator, gets wrapped
//! - **Re-tokenizable literals** - literal text that would not scan back as
//!   one literal is quoted, or escaped when it carries modifiers
//!
//! # Examples
//!
//! ```
//! use boolex::{Grammar, parse_str};
//! use boolex::output::to_syntax;
//!
//! let expr = parse_str(&Grammar::default(), "a && (b || c)").unwrap();
//! assert_eq!(to_syntax(&expr, &Grammar::sql_style()), "a AND (b OR c)");
//! ```

use crate::{
    ast::{BoolExpr, Clause, Token},
    dnf::build_expr_from_clause_list,
    grammar::{ESCAPE_CHAR, Grammar},
};

const OR_PRECEDENCE: u8 = 1;
const AND_PRECEDENCE: u8 = 2;

pub struct Printer<'g> {
    grammar: &'g Grammar,
}

impl<'g> Printer<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Printer { grammar }
    }

    pub fn print_token(&self, token: &Token) -> String {
        match token {
            Token::Variable(v) => {
                let mut out: String = v.modifiers().iter().collect();
                out.push_str(&self.print_literal_text(v.value(), !v.modifiers().is_empty()));
                out
            }
            Token::Function(f) => {
                let mut out: String = f.variable().modifiers().iter().collect();
                out.push_str(f.variable().value());
                out
            }
            Token::And => self.grammar.and_operator().to_string(),
            Token::Or => self.grammar.or_operator().to_string(),
            Token::OpenContainer => self.grammar.open_container().to_string(),
            Token::CloseContainer => self.grammar.close_container().to_string(),
        }
    }

    pub fn print_expr(&self, expr: &BoolExpr) -> String {
        self.print_node(expr, 0, false)
    }

    pub fn print_clauses(&self, clauses: &[Clause]) -> String {
        self.print_expr(&build_expr_from_clause_list(clauses))
    }

    fn print_node(&self, expr: &BoolExpr, parent: u8, right_of_same: bool) -> String {
        let (precedence, left, right, op) = match expr {
            BoolExpr::Var(token) => return self.print_token(token),
            BoolExpr::And(l, r) => (AND_PRECEDENCE, l, r, self.grammar.and_operator()),
            BoolExpr::Or(l, r) => (OR_PRECEDENCE, l, r, self.grammar.or_operator()),
        };

        let body = format!(
            "{} {} {}",
            self.print_node(left, precedence, false),
            op,
            self.print_node(right, precedence, true)
        );

        if precedence < parent || (right_of_same && precedence == parent) {
            format!(
                "{}{}{}",
                self.grammar.open_container(),
                body,
                self.grammar.close_container()
            )
        } else {
            body
        }
    }

    fn is_special_at(&self, chars: &[char], i: usize) -> bool {
        let ch = chars[i];
        let starts_with = |op: &str| {
            !op.is_empty()
                && op
                    .chars()
                    .enumerate()
                    .all(|(offset, c)| chars.get(i + offset) == Some(&c))
        };

        let at_edge = i == 0 || i + 1 == chars.len();

        (ch.is_whitespace() && (self.grammar.split_on_whitespace() || at_edge))
            || ch == ESCAPE_CHAR
            || ch == self.grammar.quote()
            || ch == self.grammar.open_container()
            || ch == self.grammar.close_container()
            || starts_with(self.grammar.and_operator())
            || starts_with(self.grammar.or_operator())
    }

    fn print_literal_text(&self, value: &str, has_modifiers: bool) -> String {
        let chars: Vec<char> = value.chars().collect();
        let needs_care = (0..chars.len()).any(|i| self.is_special_at(&chars, i))
            || (!has_modifiers && chars.first().is_some_and(|c| self.grammar.is_modifier(*c)));

        if !has_modifiers && (value.is_empty() || needs_care) {
            return self.quote(&chars);
        }
        if !needs_care {
            return value.to_string();
        }

        let mut out = String::with_capacity(value.len() * 2);
        for i in 0..chars.len() {
            if self.is_special_at(&chars, i) {
                out.push(ESCAPE_CHAR);
            }
            out.push(chars[i]);
        }
        out
    }

    fn quote(&self, chars: &[char]) -> String {
        let quote = self.grammar.quote();
        let mut out = String::with_capacity(chars.len() + 2);
        out.push(quote);
        for &c in chars {
            if c == quote || c == ESCAPE_CHAR {
                out.push(ESCAPE_CHAR);
            }
            out.push(c);
        }
        out.push(quote);
        out
    }
}

/// Render an expression in the given grammar.
pub fn to_syntax(expr: &BoolExpr, grammar: &Grammar) -> String {
    Printer::new(grammar).print_expr(expr)
}

/// Render a clause list as an OR of AND chains in the given grammar.
pub fn clauses_to_syntax(clauses: &[Clause], grammar: &Grammar) -> String {
    Printer::new(grammar).print_clauses(clauses)
}
