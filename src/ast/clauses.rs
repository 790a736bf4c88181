use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use serde::Serialize;

use crate::ast::Token;

/// A conjunction of literals. Never contains nested boolean structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Clause(Vec<Token>);

impl Clause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> Vec<Token> {
        self.0
    }

    /// Display texts of the literals, in order.
    pub fn texts(&self) -> Vec<String> {
        self.0.iter().map(Token::to_string).collect()
    }
}

impl Deref for Clause {
    type Target = Vec<Token>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Clause {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Token>> for Clause {
    fn from(tokens: Vec<Token>) -> Self {
        Clause(tokens)
    }
}

impl FromIterator<Token> for Clause {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Clause(iter.into_iter().collect())
    }
}

impl IntoIterator for Clause {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.texts().join(", "))
    }
}

/// A disjunction of clauses: the flattened form of a DNF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClauseList(Vec<Clause>);

impl ClauseList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> Vec<Clause> {
        self.0
    }

    pub fn texts(&self) -> Vec<Vec<String>> {
        self.0.iter().map(Clause::texts).collect()
    }
}

impl Deref for ClauseList {
    type Target = Vec<Clause>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ClauseList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Clause>> for ClauseList {
    fn from(clauses: Vec<Clause>) -> Self {
        ClauseList(clauses)
    }
}

impl From<Vec<Vec<Token>>> for ClauseList {
    fn from(clauses: Vec<Vec<Token>>) -> Self {
        ClauseList(clauses.into_iter().map(Clause::from).collect())
    }
}

impl FromIterator<Clause> for ClauseList {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        ClauseList(iter.into_iter().collect())
    }
}

impl IntoIterator for ClauseList {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ClauseList {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ClauseList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Clause::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
