//! Logical connectives and the registry binding them to token kinds.
//!
//! The set of connectives is closed. Each connective is bound to exactly one [`TokenKind`], takes
//! a fixed number of operands, and has an integer precedence. A connective with a higher
//! precedence binds more tightly than one with a lower precedence:
//!
//! | connective    | token kind | arity  | precedence | glyph |
//! | ------------- | ---------- | ------ | ---------- | ----- |
//! | `Negation`    | `NOT`      | unary  | 5          | `¬`   |
//! | `Conjunction` | `AND`      | binary | 4          | `∧`   |
//! | `Disjunction` | `OR`       | binary | 3          | `∨`   |
//! | `Implication` | `IMPLIES`  | binary | 2          | `→`   |
//!
//! Connectives are ordered only by their precedence. Two connectives with the same precedence
//! compare as [`Ordering::Equal`] even when they are different connectives.
//!
//! ```rust
//! use std::cmp::Ordering;
//! use proplogic::connectives::{BinaryConnective, ConnectiveRegistry};
//! use proplogic::token::{Token, TokenKind};
//!
//! let registry = ConnectiveRegistry::standard();
//! let token = Token::new(TokenKind::And, "&", 0);
//!
//! assert_eq!(registry.binary(Some(&token)), Some(BinaryConnective::Conjunction));
//! assert_eq!(registry.unary(Some(&token)), None);
//!
//! let ordering = BinaryConnective::Conjunction.cmp_precedence(BinaryConnective::Implication);
//! assert_eq!(ordering, Ordering::Greater);
//! ```

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

use crate::token::{Token, TokenKind};

/// Number of operands a connective takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    pub fn operands(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

/// Connective taking a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryConnective {
    /// Logical negation, commonly known as "not".
    Negation,
}

/// Connective taking two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryConnective {
    /// Logical conjunction, commonly known as "and".
    Conjunction,
    /// Logical disjunction, commonly known as "or".
    Disjunction,
    /// Material implication, also known as a conditional.
    Implication,
}

/// Any logical connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    Unary(UnaryConnective),
    Binary(BinaryConnective),
}

impl Connective {
    /// The built-in connective table.
    pub const ALL: [Connective; 4] = [
        Connective::Unary(UnaryConnective::Negation),
        Connective::Binary(BinaryConnective::Conjunction),
        Connective::Binary(BinaryConnective::Disjunction),
        Connective::Binary(BinaryConnective::Implication),
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Connective::Unary(UnaryConnective::Negation) => "Negation",
            Connective::Binary(BinaryConnective::Conjunction) => "Conjunction",
            Connective::Binary(BinaryConnective::Disjunction) => "Disjunction",
            Connective::Binary(BinaryConnective::Implication) => "Implication",
        }
    }

    /// The token kind this connective is written with.
    pub const fn token_kind(self) -> TokenKind {
        match self {
            Connective::Unary(UnaryConnective::Negation) => TokenKind::Not,
            Connective::Binary(BinaryConnective::Conjunction) => TokenKind::And,
            Connective::Binary(BinaryConnective::Disjunction) => TokenKind::Or,
            Connective::Binary(BinaryConnective::Implication) => TokenKind::Implies,
        }
    }

    pub const fn arity(self) -> Arity {
        match self {
            Connective::Unary(_) => Arity::Unary,
            Connective::Binary(_) => Arity::Binary,
        }
    }

    pub const fn precedence(self) -> u8 {
        match self {
            Connective::Unary(UnaryConnective::Negation) => 5,
            Connective::Binary(BinaryConnective::Conjunction) => 4,
            Connective::Binary(BinaryConnective::Disjunction) => 3,
            Connective::Binary(BinaryConnective::Implication) => 2,
        }
    }

    /// The canonical glyph used when rendering formulas.
    pub const fn glyph(self) -> &'static str {
        match self {
            Connective::Unary(UnaryConnective::Negation) => "¬",
            Connective::Binary(BinaryConnective::Conjunction) => "∧",
            Connective::Binary(BinaryConnective::Disjunction) => "∨",
            Connective::Binary(BinaryConnective::Implication) => "→",
        }
    }

    /// Compare two connectives by precedence alone.
    pub fn cmp_precedence(self, other: impl Into<Connective>) -> Ordering {
        self.precedence().cmp(&other.into().precedence())
    }

    pub fn binds_tighter_than(self, other: impl Into<Connective>) -> bool {
        self.cmp_precedence(other) == Ordering::Greater
    }
}

const fn unique_token_kinds(connectives: &[Connective]) -> bool {
    let mut i = 0;

    while i < connectives.len() {
        let mut j = i + 1;

        while j < connectives.len() {
            if connectives[i].token_kind() as u8 == connectives[j].token_kind() as u8 {
                return false;
            }

            j += 1;
        }

        i += 1;
    }

    true
}

const _: () = assert!(
    unique_token_kinds(&Connective::ALL),
    "each token kind may be bound to at most one connective"
);

impl From<UnaryConnective> for Connective {
    fn from(connective: UnaryConnective) -> Self {
        Connective::Unary(connective)
    }
}

impl From<BinaryConnective> for Connective {
    fn from(connective: BinaryConnective) -> Self {
        Connective::Binary(connective)
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

impl UnaryConnective {
    pub const fn connective(self) -> Connective {
        Connective::Unary(self)
    }
}

impl BinaryConnective {
    pub const fn connective(self) -> Connective {
        Connective::Binary(self)
    }
}

macro_rules! delegate_to_connective {
    ($ty:ty) => {
        impl $ty {
            pub const fn name(self) -> &'static str {
                self.connective().name()
            }

            pub const fn token_kind(self) -> TokenKind {
                self.connective().token_kind()
            }

            pub const fn arity(self) -> Arity {
                self.connective().arity()
            }

            pub const fn precedence(self) -> u8 {
                self.connective().precedence()
            }

            pub const fn glyph(self) -> &'static str {
                self.connective().glyph()
            }

            pub fn cmp_precedence(self, other: impl Into<Connective>) -> Ordering {
                self.connective().cmp_precedence(other)
            }

            pub fn binds_tighter_than(self, other: impl Into<Connective>) -> bool {
                self.connective().binds_tighter_than(other)
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.glyph())
            }
        }
    };
}

delegate_to_connective!(UnaryConnective);
delegate_to_connective!(BinaryConnective);

/// Error produced when building a registry whose connectives are not uniquely bound to token
/// kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("A connective with token kind {kind} is already defined: {} conflicts with {}", .first.name(), .second.name())]
    DuplicateTokenKind {
        kind: TokenKind,
        first: Connective,
        second: Connective,
    },
}

/// Mapping from token kinds to the connectives they denote.
///
/// Lookups are partitioned by arity: [`ConnectiveRegistry::unary`] never returns a binary
/// connective and [`ConnectiveRegistry::binary`] never returns a unary one. A missing token or a
/// token that is not bound to a connective of the requested arity yields `None`.
#[derive(Debug, Clone)]
pub struct ConnectiveRegistry {
    connectives: HashMap<TokenKind, Connective>,
}

impl ConnectiveRegistry {
    /// Build a registry from a set of connectives.
    ///
    /// Fails if two connectives are bound to the same token kind.
    pub fn new<I>(connectives: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Connective>,
    {
        let mut registered = HashMap::new();

        for connective in connectives {
            match registered.entry(connective.token_kind()) {
                Entry::Occupied(entry) => {
                    return Err(RegistryError::DuplicateTokenKind {
                        kind: *entry.key(),
                        first: *entry.get(),
                        second: connective,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(connective);
                }
            }
        }

        Ok(Self {
            connectives: registered,
        })
    }

    /// The process-wide registry of the built-in connectives.
    ///
    /// The built-in table is checked for duplicate token kinds at compile time, so building it
    /// cannot fail.
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<ConnectiveRegistry> = OnceLock::new();

        STANDARD.get_or_init(|| {
            let connectives = Connective::ALL
                .into_iter()
                .map(|connective| (connective.token_kind(), connective))
                .collect::<HashMap<_, _>>();

            debug!(count = connectives.len(), "initialized connective registry");
            Self { connectives }
        })
    }

    pub fn get(&self, kind: TokenKind) -> Option<Connective> {
        self.connectives.get(&kind).copied()
    }

    pub fn unary(&self, token: Option<&Token>) -> Option<UnaryConnective> {
        match self.get(token?.kind())? {
            Connective::Unary(connective) => Some(connective),
            Connective::Binary(_) => None,
        }
    }

    pub fn binary(&self, token: Option<&Token>) -> Option<BinaryConnective> {
        match self.get(token?.kind())? {
            Connective::Binary(connective) => Some(connective),
            Connective::Unary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.connectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectives.is_empty()
    }
}
