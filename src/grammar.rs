//! Grammar configuration for the boolex tokenizer.
//!
//! A [`Grammar`] describes one surface dialect: how AND and OR are spelled,
//! which characters open and close a group, which character quotes a literal,
//! which leading characters are peeled off identifiers as modifiers, and how
//! function parameters are separated.
//!
//! Grammars are immutable once built and can be shared freely between
//! threads. Use [`GrammarBuilder`] for custom dialects or one of the presets:
//!
//! | Preset | AND | OR | Quote |
//! |---|---|---|---|
//! | [`Grammar::c_style`] | `&&` | `\|\|` | `"` |
//! | [`Grammar::python_style`] | `and` | `or` | `'` |
//! | [`Grammar::matlab_style`] | `&` | `\|` | `'` |
//! | [`Grammar::sql_style`] | `AND` | `OR` | `'` |
//!
//! # Examples
//!
//! ```
//! use boolex::grammar::Grammar;
//!
//! let grammar = Grammar::builder()
//!     .and_operator("&")
//!     .or_operator("|")
//!     .modifiers(['!', '~'])
//!     .build();
//!
//! assert_eq!(grammar.and_operator(), "&");
//! assert!(grammar.is_modifier('!'));
//! ```

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The escape character. Not configurable.
pub const ESCAPE_CHAR: char = '\\';

/// Immutable description of a logic syntax dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grammar {
    and_operator: String,
    or_operator: String,
    open_container: char,
    close_container: char,
    quote: char,
    ignore_operators_in_quotes: bool,
    modifiers: BTreeSet<char>,
    split_on_whitespace: bool,
    parameter_separator: char,
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar {
            and_operator: "&&".to_string(),
            or_operator: "||".to_string(),
            open_container: '(',
            close_container: ')',
            quote: '\'',
            ignore_operators_in_quotes: true,
            modifiers: BTreeSet::new(),
            split_on_whitespace: true,
            parameter_separator: ',',
        }
    }
}

impl Grammar {
    /// Start building a grammar from the defaults.
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// C-style syntax: `a && (b || "c d")`.
    pub fn c_style() -> Self {
        Grammar::builder()
            .and_operator("&&")
            .or_operator("||")
            .quote('"')
            .build()
    }

    /// Python-style syntax: `a and (b or 'c d')`.
    pub fn python_style() -> Self {
        Grammar::builder()
            .and_operator("and")
            .or_operator("or")
            .quote('\'')
            .build()
    }

    /// MATLAB-style syntax: `a & (b | 'c d')`.
    pub fn matlab_style() -> Self {
        Grammar::builder()
            .and_operator("&")
            .or_operator("|")
            .quote('\'')
            .build()
    }

    /// SQL-style syntax: `a AND (b OR 'c d')`.
    pub fn sql_style() -> Self {
        Grammar::builder()
            .and_operator("AND")
            .or_operator("OR")
            .quote('\'')
            .build()
    }

    pub fn from_style(style: Style) -> Self {
        match style {
            Style::C => Self::c_style(),
            Style::Python => Self::python_style(),
            Style::Matlab => Self::matlab_style(),
            Style::Sql => Self::sql_style(),
        }
    }

    /// Re-open this grammar for modification.
    pub fn to_builder(&self) -> GrammarBuilder {
        GrammarBuilder {
            grammar: self.clone(),
        }
    }

    pub fn and_operator(&self) -> &str {
        &self.and_operator
    }

    pub fn or_operator(&self) -> &str {
        &self.or_operator
    }

    pub fn open_container(&self) -> char {
        self.open_container
    }

    pub fn close_container(&self) -> char {
        self.close_container
    }

    pub fn quote(&self) -> char {
        self.quote
    }

    /// Stored for compatibility with existing dialect definitions.
    ///
    /// Quoted spans are always read atomically, so operators inside quotes
    /// are never recognised whatever this flag says.
    pub fn ignore_operators_in_quotes(&self) -> bool {
        self.ignore_operators_in_quotes
    }

    pub fn modifiers(&self) -> &BTreeSet<char> {
        &self.modifiers
    }

    pub fn is_modifier(&self, ch: char) -> bool {
        self.modifiers.contains(&ch)
    }

    pub fn split_on_whitespace(&self) -> bool {
        self.split_on_whitespace
    }

    pub fn parameter_separator(&self) -> char {
        self.parameter_separator
    }

    pub fn escape(&self) -> char {
        ESCAPE_CHAR
    }
}

/// Fluent builder for [`Grammar`].
///
/// Every setter consumes and returns the builder; [`GrammarBuilder::build`]
/// hands out the finished, immutable grammar.
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    grammar: Grammar,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every field to the given preset.
    pub fn style(mut self, style: Style) -> Self {
        self.grammar = Grammar::from_style(style);
        self
    }

    /// An empty operator never matches.
    pub fn and_operator(mut self, op: impl Into<String>) -> Self {
        self.grammar.and_operator = op.into();
        self
    }

    /// An empty operator never matches.
    pub fn or_operator(mut self, op: impl Into<String>) -> Self {
        self.grammar.or_operator = op.into();
        self
    }

    pub fn containers(mut self, open: char, close: char) -> Self {
        self.grammar.open_container = open;
        self.grammar.close_container = close;
        self
    }

    pub fn quote(mut self, quote: char) -> Self {
        self.grammar.quote = quote;
        self
    }

    pub fn ignore_operators_in_quotes(mut self, ignore: bool) -> Self {
        self.grammar.ignore_operators_in_quotes = ignore;
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = char>) -> Self {
        self.grammar.modifiers = modifiers.into_iter().collect();
        self
    }

    pub fn split_on_whitespace(mut self, split: bool) -> Self {
        self.grammar.split_on_whitespace = split;
        self
    }

    pub fn parameter_separator(mut self, separator: char) -> Self {
        self.grammar.parameter_separator = separator;
        self
    }

    pub fn build(self) -> Grammar {
        self.grammar
    }
}

/// Named syntax presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    C,
    Python,
    Matlab,
    Sql,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::C, Style::Python, Style::Matlab, Style::Sql];

    pub fn grammar(self) -> Grammar {
        Grammar::from_style(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            Style::C => "c",
            Style::Python => "python",
            Style::Matlab => "matlab",
            Style::Sql => "sql",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "c-style" => Ok(Style::C),
            "python" | "py" => Ok(Style::Python),
            "matlab" | "m" => Ok(Style::Matlab),
            "sql" => Ok(Style::Sql),
            _ => Err(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let g = Grammar::default();
        assert_eq!(g.and_operator(), "&&");
        assert_eq!(g.or_operator(), "||");
        assert_eq!(g.open_container(), '(');
        assert_eq!(g.close_container(), ')');
        assert_eq!(g.quote(), '\'');
        assert!(g.modifiers().is_empty());
        assert!(g.split_on_whitespace());
        assert_eq!(g.parameter_separator(), ',');
        assert_eq!(g.escape(), '\\');
    }

    #[test]
    fn test_presets_set_operators_and_quote() {
        assert_eq!(Grammar::c_style().quote(), '"');
        assert_eq!(Grammar::python_style().and_operator(), "and");
        assert_eq!(Grammar::matlab_style().or_operator(), "|");
        assert_eq!(Grammar::sql_style().and_operator(), "AND");
    }

    #[test]
    fn test_style_reset_discards_previous_fields() {
        let g = Grammar::builder()
            .modifiers(['!'])
            .and_operator("+")
            .style(Style::Matlab)
            .build();
        assert_eq!(g, Grammar::matlab_style());
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("SQL".parse::<Style>(), Ok(Style::Sql));
        assert_eq!("py".parse::<Style>(), Ok(Style::Python));
        assert!("cobol".parse::<Style>().is_err());
    }

    #[test]
    fn test_deserialize_partial_grammar() {
        let g: Grammar = serde_json::from_str(r#"{"and_operator": "&", "modifiers": ["!"]}"#)
            .expect("valid grammar json");
        assert_eq!(g.and_operator(), "&");
        assert_eq!(g.or_operator(), "||");
        assert!(g.is_modifier('!'));
    }
}
