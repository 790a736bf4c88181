//! Resource limits for untrusted input.
//!
//! Parsing recurses once per open container and DNF expansion can grow the
//! clause count exponentially. `max_depth` is enforced by
//! [`Parser::with_limits`](crate::Parser::with_limits). `max_clauses` is
//! enforced by the `*_bounded` functions in [`dnf`](crate::dnf), which count
//! clauses on the unexpanded tree before distributing anything. The unbounded
//! algebra (`to_dnf`, `inject_*`, `combine_*`) does not consult them.
//!
//! Neither bound limits the length of a flat operator chain: `a && b && ...`
//! parses into a left-deep tree whose height grows with the chain, and the
//! recursive algebra walks that height. Cap the input length when chains
//! of many thousands of operators are possible.

/// Resource limits applied by the parser and the bounded clause flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum container nesting accepted by the parser.
    pub max_depth: usize,
    /// Maximum number of clauses any intermediate clause list may hold.
    pub max_clauses: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_clauses: 65_536,
        }
    }
}

impl Limits {
    pub fn new(max_depth: usize, max_clauses: usize) -> Self {
        Self {
            max_depth,
            max_clauses,
        }
    }

    /// Large limits for trusted input and tests.
    pub fn permissive() -> Self {
        Self {
            max_depth: 4096,
            max_clauses: 1 << 22,
        }
    }

    /// Tight limits for input from untrusted callers.
    pub fn strict() -> Self {
        Self {
            max_depth: 32,
            max_clauses: 1024,
        }
    }
}
