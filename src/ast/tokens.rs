use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::atomic::{AtomicU64, Ordering},
};

use serde::Serialize;

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a literal token.
///
/// Every literal created by the lexer gets a fresh id, so two literals with
/// the same text taken from different positions stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TokenId(u64);

impl TokenId {
    /// Reserved for the truth sentinel, see [`Token::truth`].
    pub const TRUTH: TokenId = TokenId(0);

    pub fn fresh() -> Self {
        TokenId(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// A plain literal: an identifier or quoted string.
///
/// Equality and hashing go by [`TokenId`] only.
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    #[serde(skip)]
    id: TokenId,
    value: String,
    modifiers: Vec<char>,
}

impl Variable {
    pub fn new(value: impl Into<String>, modifiers: Vec<char>) -> Self {
        Variable {
            id: TokenId::fresh(),
            value: value.into(),
            modifiers,
        }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    /// The literal text with modifiers stripped.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Leading modifier characters, in source order.
    pub fn modifiers(&self) -> &[char] {
        &self.modifiers
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A function-call literal such as `has(item, 2)`.
///
/// The base [`Variable`] holds the whole call text (`has(item, 2)`) and the
/// stripped modifiers; `name` and `params` are the parsed pieces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Function {
    #[serde(flatten)]
    variable: Variable,
    name: String,
    params: Vec<String>,
}

impl Function {
    pub fn new(
        value: impl Into<String>,
        modifiers: Vec<char>,
        name: impl Into<String>,
        params: Vec<String>,
    ) -> Self {
        Function {
            variable: Variable::new(value, modifiers),
            name: name.into(),
            params,
        }
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

/// Lexical token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind")]
pub enum Token {
    /// Identifier or quoted literal
    ///
    /// # Examples
    /// ```text
    /// fire
    /// !ice
    /// 'Ice Beam'
    /// ```
    Variable(Variable),

    /// Function-call literal; parameters split at top-level separators
    ///
    /// # Examples
    /// ```text
    /// count(badge, 8)
    /// ~has(surf)
    /// ```
    Function(Function),

    /// Configured AND operator
    And,

    /// Configured OR operator
    Or,

    /// Opening container, e.g. `(`
    OpenContainer,

    /// Closing container, e.g. `)`
    CloseContainer,
}

impl Token {
    pub fn variable(value: impl Into<String>, modifiers: Vec<char>) -> Self {
        Token::Variable(Variable::new(value, modifiers))
    }

    pub fn function(
        value: impl Into<String>,
        modifiers: Vec<char>,
        name: impl Into<String>,
        params: Vec<String>,
    ) -> Self {
        Token::Function(Function::new(value, modifiers, name, params))
    }

    /// The literal standing for logical truth.
    ///
    /// Produced when an empty clause list is rebuilt into an expression. The
    /// evaluator treats it as satisfied without asking the predicate.
    pub fn truth() -> Self {
        Token::Variable(Variable {
            id: TokenId::TRUTH,
            value: "true".to_string(),
            modifiers: Vec::new(),
        })
    }

    pub fn is_truth(&self) -> bool {
        self.id() == Some(TokenId::TRUTH)
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::And | Token::Or)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Variable(_) | Token::Function(_))
    }

    /// The variable part of a literal; functions expose their base variable.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Token::Variable(v) => Some(v),
            Token::Function(f) => Some(f.variable()),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Token::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<TokenId> {
        self.as_variable().map(Variable::id)
    }

    pub fn value(&self) -> Option<&str> {
        self.as_variable().map(Variable::value)
    }

    pub fn modifiers(&self) -> &[char] {
        self.as_variable().map(Variable::modifiers).unwrap_or(&[])
    }

    /// Compare kind, text and modifiers, ignoring identity.
    pub fn same_text(&self, other: &Token) -> bool {
        match (self, other) {
            (Token::Variable(a), Token::Variable(b)) => {
                a.value == b.value && a.modifiers == b.modifiers
            }
            (Token::Function(a), Token::Function(b)) => {
                a.variable.value == b.variable.value
                    && a.variable.modifiers == b.variable.modifiers
                    && a.name == b.name
                    && a.params == b.params
            }
            (a, b) => !a.is_literal() && a == b,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_variable() {
            Some(v) => {
                for m in v.modifiers() {
                    write!(f, "{}", m)?;
                }
                f.write_str(v.value())
            }
            None => match self {
                Token::And => f.write_str("AND"),
                Token::Or => f.write_str("OR"),
                Token::OpenContainer => f.write_str("("),
                Token::CloseContainer => f.write_str(")"),
                _ => unreachable!("literals handled above"),
            },
        }
    }
}
