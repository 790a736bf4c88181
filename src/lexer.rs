use std::mem;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::Token,
    grammar::{ESCAPE_CHAR, Grammar},
};

/// Errors raised while scanning input text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A function container was opened but never closed.
    #[error("unterminated container starting at position {position}")]
    UnterminatedContainer { position: usize },

    /// A quoted literal was opened but never closed.
    #[error("unterminated quote starting at position {position}")]
    UnterminatedQuote { position: usize },

    /// The input ends with an escape character.
    #[error("dangling escape character at position {position}")]
    DanglingEscape { position: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnterminatedContainer { position }
            | LexError::UnterminatedQuote { position }
            | LexError::DanglingEscape { position } => *position,
        }
    }
}

/// Structural problems found by [`check_token_list`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("consecutive operators at token {index}")]
    ConsecutiveOperators { index: usize },

    #[error("operator directly after an open container at token {index}")]
    OperatorAfterOpen { index: usize },

    #[error("open container at token {index} must start the input or follow an operator or another open container")]
    MisplacedOpen { index: usize },
}

impl GrammarError {
    /// Index of the offending token.
    pub fn index(&self) -> usize {
        match self {
            GrammarError::ConsecutiveOperators { index }
            | GrammarError::OperatorAfterOpen { index }
            | GrammarError::MisplacedOpen { index } => *index,
        }
    }
}

/// Single-pass scanner turning text into [`Token`]s under a [`Grammar`].
pub struct Lexer<'g> {
    grammar: &'g Grammar,
    input: Vec<char>,
    position: usize,
    buffer: String,
    /// Byte span of the buffer from the first to past the last escaped char.
    /// Trimming never cuts into it.
    escaped: Option<(usize, usize)>,
    tokens: Vec<Token>,
}

impl<'g> Lexer<'g> {
    pub fn new(grammar: &'g Grammar, input: &str) -> Self {
        Lexer {
            grammar,
            input: input.chars().collect(),
            position: 0,
            buffer: String::new(),
            escaped: None,
            tokens: Vec::new(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// True when the configured operator starts at the current position.
    fn matches_at(&self, op: &str) -> bool {
        if op.is_empty() {
            return false;
        }
        op.chars()
            .enumerate()
            .all(|(offset, c)| self.peek_char(offset) == Some(c))
    }

    /// Nothing but insignificant whitespace has been buffered.
    fn at_boundary(&self) -> bool {
        if self.grammar.split_on_whitespace() {
            self.buffer.is_empty()
        } else {
            self.escaped.is_none() && self.buffer.trim().is_empty()
        }
    }

    fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.escaped = None;
    }

    fn push_escaped(&mut self, ch: char) {
        let start = self.buffer.len();
        self.buffer.push(ch);
        let end = self.buffer.len();
        self.escaped = Some(match self.escaped {
            Some((first, _)) => (first, end),
            None => (start, end),
        });
    }

    /// Drain the buffer; without whitespace splitting, unescaped whitespace
    /// at either edge is dropped.
    fn take_buffer(&mut self) -> String {
        let raw = mem::take(&mut self.buffer);
        let escaped = self.escaped.take();
        if self.grammar.split_on_whitespace() {
            return raw;
        }

        let (first, last) = escaped.unwrap_or((raw.len(), 0));
        let start = first - raw[..first].trim_start().len();
        let end = last + raw[last..].trim_end().len();
        raw[start..end.max(start)].to_string()
    }

    fn strip_modifiers(&self, text: &str) -> (Vec<char>, String) {
        let modifiers: Vec<char> = text
            .chars()
            .take_while(|c| self.grammar.is_modifier(*c))
            .collect();
        let value = text.chars().skip(modifiers.len()).collect();
        (modifiers, value)
    }

    fn flush(&mut self) {
        let text = self.take_buffer();
        if text.is_empty() {
            return;
        }
        trace!(text = %text, "flush literal");
        let (modifiers, value) = self.strip_modifiers(&text);
        self.tokens.push(Token::variable(value, modifiers));
    }

    fn read_escape(&mut self) -> Result<char, LexError> {
        match self.peek_char(1) {
            Some(ch) => {
                self.position += 2;
                Ok(ch)
            }
            None => Err(LexError::DanglingEscape {
                position: self.position,
            }),
        }
    }

    fn read_quoted(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let quote = self.grammar.quote();
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            if ch == ESCAPE_CHAR {
                result.push(self.read_escape()?);
            } else if ch == quote {
                self.advance();
                return Ok(result);
            } else {
                result.push(ch);
                self.advance();
            }
        }

        Err(LexError::UnterminatedQuote { position: start })
    }

    /// Read `name(p1, p2, ...)` with the name already buffered and the
    /// cursor on the open container.
    fn read_function(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let open = self.grammar.open_container();
        let close = self.grammar.close_container();
        let separator = self.grammar.parameter_separator();

        let head = self.take_buffer();
        let (modifiers, name) = self.strip_modifiers(&head);

        let mut raw = String::new();
        let mut params = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;
        let mut i = self.position;

        loop {
            let Some(&ch) = self.input.get(i) else {
                return Err(LexError::UnterminatedContainer { position: start });
            };

            if ch == ESCAPE_CHAR {
                let Some(&next) = self.input.get(i + 1) else {
                    return Err(LexError::UnterminatedContainer { position: start });
                };
                raw.push(ch);
                raw.push(next);
                current.push(next);
                i += 2;
                continue;
            }

            raw.push(ch);
            i += 1;

            if ch == open {
                depth += 1;
                if depth > 1 {
                    current.push(ch);
                }
            } else if ch == close {
                depth -= 1;
                if depth == 0 {
                    break;
                }
                current.push(ch);
            } else if ch == separator && depth == 1 {
                params.push(current.trim().to_string());
                current.clear();
            } else {
                current.push(ch);
            }
        }

        if !params.is_empty() || !current.trim().is_empty() {
            params.push(current.trim().to_string());
        }

        self.position = i;
        trace!(name = %name, params = params.len(), "read function");

        let value = format!("{}{}", name, raw);
        Ok(Token::function(value, modifiers, name, params))
    }

    fn emit_operator(&mut self, token: Token, len: usize) {
        self.flush();
        self.tokens.push(token);
        self.position += len;
    }

    /// Scan the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let grammar = self.grammar;
        let and_op = grammar.and_operator();
        let or_op = grammar.or_operator();
        let and_len = and_op.chars().count();
        let or_len = or_op.chars().count();

        // Longer spelling first so `&` cannot shadow `&&`.
        let or_first = or_len > and_len;

        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                if grammar.split_on_whitespace() {
                    self.flush();
                } else {
                    self.buffer.push(ch);
                }
                self.advance();
            } else if ch == ESCAPE_CHAR {
                let escaped = self.read_escape()?;
                self.push_escaped(escaped);
            } else if ch == grammar.quote() && self.at_boundary() {
                self.clear_buffer();
                let value = self.read_quoted()?;
                self.tokens.push(Token::variable(value, Vec::new()));
            } else if or_first && self.matches_at(or_op) {
                self.emit_operator(Token::Or, or_len);
            } else if self.matches_at(and_op) {
                self.emit_operator(Token::And, and_len);
            } else if self.matches_at(or_op) {
                self.emit_operator(Token::Or, or_len);
            } else if ch == grammar.open_container() {
                if self.at_boundary() {
                    self.clear_buffer();
                    self.tokens.push(Token::OpenContainer);
                    self.advance();
                } else {
                    let function = self.read_function()?;
                    self.tokens.push(function);
                }
            } else if ch == grammar.close_container() {
                self.flush();
                self.tokens.push(Token::CloseContainer);
                self.advance();
            } else {
                self.buffer.push(ch);
                self.advance();
            }
        }

        self.flush();
        debug!(chars = self.input.len(), tokens = self.tokens.len(), "tokenized input");
        Ok(self.tokens)
    }

    /// Like [`Lexer::tokenize`] but reports failure as a flag with no tokens.
    pub fn try_tokenize(self) -> (bool, Vec<Token>) {
        match self.tokenize() {
            Ok(tokens) => (true, tokens),
            Err(e) => {
                debug!(error = %e, "tokenize failed");
                (false, Vec::new())
            }
        }
    }
}

pub fn tokenize(grammar: &Grammar, input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(grammar, input).tokenize()
}

pub fn try_tokenize(grammar: &Grammar, input: &str) -> (bool, Vec<Token>) {
    Lexer::new(grammar, input).try_tokenize()
}

/// Structural sanity check over a token sequence.
///
/// Rejects two operators in a row, an operator right after an open
/// container, and an open container that neither starts the sequence nor
/// follows an operator or another open container.
pub fn check_token_list(tokens: &[Token]) -> Result<(), GrammarError> {
    for (index, token) in tokens.iter().enumerate() {
        let prev = index.checked_sub(1).map(|p| &tokens[p]);

        if token.is_operator() {
            match prev {
                Some(p) if p.is_operator() => {
                    return Err(GrammarError::ConsecutiveOperators { index });
                }
                Some(Token::OpenContainer) => {
                    return Err(GrammarError::OperatorAfterOpen { index });
                }
                _ => {}
            }
        } else if *token == Token::OpenContainer {
            match prev {
                None | Some(Token::And | Token::Or | Token::OpenContainer) => {}
                Some(_) => return Err(GrammarError::MisplacedOpen { index }),
            }
        }
    }
    Ok(())
}

#[test]
fn test_operators_and_containers() {
    let grammar = Grammar::default();
    let tokens = tokenize(&grammar, "a && (b || c)").unwrap();
    assert_eq!(tokens.len(), 7);
    assert_eq!(tokens[1], Token::And);
    assert_eq!(tokens[2], Token::OpenContainer);
    assert_eq!(tokens[4], Token::Or);
    assert_eq!(tokens[6], Token::CloseContainer);
}

#[test]
fn test_empty_operator_never_matches() {
    let grammar = Grammar::builder().or_operator("").build();
    let tokens = tokenize(&grammar, "a && b").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(!tokens.contains(&Token::Or));
}
