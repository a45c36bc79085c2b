//! Parse propositional logic formulas into abstract syntax trees.
//!
//! Parsing happens in two stages. The [`scanner`] turns the source text into a lazy sequence of
//! [`Token`]s, accepting several synonymous glyphs for each connective. The [`parser`] then builds
//! a [`Formula`] from those tokens, consulting the [`ConnectiveRegistry`] to find out which tokens
//! denote connectives and how tightly each one binds.
//!
//! ```rust
//! use proplogic::formula::Formula;
//!
//! let formula = proplogic::parse_formula(r"A /\ B > C").unwrap();
//! let expected = Formula::implies(
//!     Formula::and(Formula::variable("A").unwrap(), Formula::variable("B").unwrap()),
//!     Formula::variable("C").unwrap(),
//! );
//!
//! assert_eq!(formula, expected);
//! assert_eq!(formula.to_string(), "((A ∧ B) → C)");
//! ```
#![deny(clippy::all)]

pub mod connectives;
pub mod formula;
pub mod parser;
pub mod scanner;
pub mod token;

pub use crate::connectives::{BinaryConnective, Connective, ConnectiveRegistry, UnaryConnective};
pub use crate::formula::Formula;
pub use crate::parser::{parse, parse_formula, ParseError, Parser, SyntaxError};
pub use crate::scanner::{scan, ScanError, Scanner};
pub use crate::token::{Token, TokenKind};

/// Error produced when a string cannot be parsed into a formula.
pub type Error = ParseError;
