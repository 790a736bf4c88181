//! # boolex - Abstract Syntax Tree
//!
//! Data model shared by every stage of the boolex pipeline:
//!
//! ```text
//! string -> Lexer -> tokens -> Parser -> BoolExpr -> to_dnf -> ClauseList
//! ```
//!
//! ## Modules
//!
//! - **[tokens]** - Lexical tokens. Literals (`Variable`, `Function`) carry an
//!   identity so equal-looking literals from different positions stay distinct.
//! - **[expressions]** - The binary boolean tree (`Var`, `And`, `Or`).
//! - **[clauses]** - Flattened DNF: an OR of clauses, each an AND of literals.
//!
//! ## Example
//!
//! ```text
//! has(surf) && (!badge || 'Ice Beam')
//! ```
//!
//! tokenizes (default grammar, `!` as modifier) to
//!
//! ```text
//! Function(has(surf)) And OpenContainer Variable(badge, ['!']) Or Variable(Ice Beam) CloseContainer
//! ```
//!
//! and flattens to the clauses `[has(surf), !badge]`, `[has(surf), Ice Beam]`.
//!
//! ## Modifiers
//!
//! Leading modifier characters are peeled off identifiers and kept as
//! metadata. The engine never interprets them; a predicate handed to the
//! evaluator decides what `!badge` means.
pub mod clauses;
pub mod expressions;
pub mod tokens;

pub use clauses::{Clause, ClauseList};
pub use expressions::BoolExpr;
pub use tokens::{Function, Token, TokenId, Variable};
