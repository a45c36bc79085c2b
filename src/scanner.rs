//! Lexical analysis of propositional formulas.
//!
//! The scanner turns a source string into a lazy sequence of [`Token`]s. At each position the
//! recognizer of every [`TokenKind`] is tried in declaration order and the first one to match
//! wins. Whitespace is consumed but never emitted. When no recognizer matches, the scanner yields
//! a single [`ScanError`] and then stops.
//!
//! Several glyphs denote the same connective:
//!
//! | kind    | glyphs              |
//! | ------- | ------------------- |
//! | not     | `~` `¬`             |
//! | and     | `&` `∧` `∙` `/\`    |
//! | or      | `\|` `∨` `\/`       |
//! | implies | `>` `→` `⇒` `⊃`     |
//!
//! ```rust
//! use proplogic::scanner::scan;
//! use proplogic::token::TokenKind;
//!
//! let kinds = scan(r"A /\ ¬B")
//!     .map(|token| token.map(|t| t.kind()))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! assert_eq!(kinds, [TokenKind::Variable, TokenKind::And, TokenKind::Not, TokenKind::Variable]);
//! ```

use std::iter::FusedIterator;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::one_of;
use nom::combinator::recognize;
use nom::IResult;
use thiserror::Error;
use tracing::trace;

use crate::token::{Token, TokenKind};

/// Error produced when the scanner reaches a character no token kind recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("Unknown character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

impl ScanError {
    /// Character offset of the offending character.
    pub fn position(&self) -> usize {
        match self {
            ScanError::InvalidCharacter { position, .. } => *position,
        }
    }
}

fn not(input: &str) -> IResult<&str, &str> {
    recognize(one_of("~¬"))(input)
}

fn and(input: &str) -> IResult<&str, &str> {
    alt((recognize(one_of("∧&∙")), tag(r"/\")))(input)
}

fn or(input: &str) -> IResult<&str, &str> {
    alt((recognize(one_of("∨|")), tag(r"\/")))(input)
}

fn implies(input: &str) -> IResult<&str, &str> {
    recognize(one_of(">→⇒⊃"))(input)
}

fn left_paren(input: &str) -> IResult<&str, &str> {
    tag("(")(input)
}

fn right_paren(input: &str) -> IResult<&str, &str> {
    tag(")")(input)
}

fn variable(input: &str) -> IResult<&str, &str> {
    take_while1(char::is_alphabetic)(input)
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while1(char::is_whitespace)(input)
}

fn recognizer(kind: TokenKind) -> fn(&str) -> IResult<&str, &str> {
    match kind {
        TokenKind::Not => not,
        TokenKind::And => and,
        TokenKind::Or => or,
        TokenKind::Implies => implies,
        TokenKind::LeftParen => left_paren,
        TokenKind::RightParen => right_paren,
        TokenKind::Variable => variable,
        TokenKind::Whitespace => whitespace,
    }
}

/// Match the longest lexeme of the first token kind that recognizes the start of `input`.
fn next_lexeme(input: &str) -> Option<(TokenKind, &str)> {
    TokenKind::ALL.into_iter().find_map(|kind| {
        recognizer(kind)(input)
            .ok()
            .map(|(_, lexeme)| (kind, lexeme))
    })
}

/// Lazy token sequence over a source string.
///
/// Cloning a scanner, or calling [`Scanner::restart`], replays the sequence from the current or
/// initial position respectively.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    offset: usize,
    position: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            position: 0,
            failed: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Rewind the scanner to the beginning of its source.
    pub fn restart(&mut self) {
        self.offset = 0;
        self.position = 0;
        self.failed = false;
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.failed {
            let rest = &self.source[self.offset..];
            let character = rest.chars().next()?;

            let Some((kind, lexeme)) = next_lexeme(rest) else {
                self.failed = true;
                return Some(Err(ScanError::InvalidCharacter {
                    character,
                    position: self.position,
                }));
            };

            let position = self.position;
            self.offset += lexeme.len();
            self.position += lexeme.chars().count();

            if kind != TokenKind::Whitespace {
                trace!(%kind, lexeme, position, "scanned token");
                return Some(Ok(Token::new(kind, lexeme, position)));
            }
        }

        None
    }
}

impl FusedIterator for Scanner<'_> {}

/// Scan a propositional formula into a lazy sequence of tokens.
pub fn scan(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{and, implies, not, or, scan, variable, ScanError};
    use crate::token::{Token, TokenKind};

    fn kinds(source: &str) -> Result<Vec<TokenKind>, ScanError> {
        scan(source).map(|token| token.map(|t| t.kind())).collect()
    }

    #[test]
    fn recognize_connectives() -> Result<(), Box<dyn Error>> {
        assert_eq!(not("¬A")?, ("A", "¬"));
        assert_eq!(and(r"/\ B")?, (" B", r"/\"));
        assert_eq!(and("∙")?, ("", "∙"));
        assert_eq!(or(r"\/")?, ("", r"\/"));
        assert_eq!(implies("⊃C")?, ("C", "⊃"));

        assert!(and("/").is_err());
        assert!(or(r"\").is_err());

        Ok(())
    }

    #[test]
    fn variables_are_greedy() -> Result<(), Box<dyn Error>> {
        assert_eq!(variable("ABC & D")?, (" & D", "ABC"));

        let tokens = scan("ABC").collect::<Result<Vec<_>, _>>()?;
        assert_eq!(tokens, [Token::new(TokenKind::Variable, "ABC", 0)]);

        Ok(())
    }

    #[test]
    fn scan_formula() -> Result<(), Box<dyn Error>> {
        let tokens = scan("A & B > C").collect::<Result<Vec<_>, _>>()?;
        let expected = [
            Token::new(TokenKind::Variable, "A", 0),
            Token::new(TokenKind::And, "&", 2),
            Token::new(TokenKind::Variable, "B", 4),
            Token::new(TokenKind::Implies, ">", 6),
            Token::new(TokenKind::Variable, "C", 8),
        ];

        assert_eq!(tokens, expected);
        Ok(())
    }

    #[test]
    fn scan_synonyms() -> Result<(), Box<dyn Error>> {
        use TokenKind::*;

        assert_eq!(kinds("~¬")?, [Not, Not]);
        assert_eq!(kinds(r"&∧∙/\")?, [And, And, And, And]);
        assert_eq!(kinds(r"|∨\/")?, [Or, Or, Or]);
        assert_eq!(kinds(">→⇒⊃")?, [Implies, Implies, Implies, Implies]);
        assert_eq!(kinds("(p)")?, [LeftParen, Variable, RightParen]);

        Ok(())
    }

    #[test]
    fn positions_count_characters() -> Result<(), Box<dyn Error>> {
        let positions = scan("¬A ∧ B")
            .map(|token| token.map(|t| t.position()))
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(positions, [0, 1, 3, 5]);
        Ok(())
    }

    #[test]
    fn whitespace_is_skipped() -> Result<(), Box<dyn Error>> {
        assert!(kinds("  \t\n ")?.is_empty());
        assert!(kinds("")?.is_empty());
        assert_eq!(kinds(" A\u{3000}B ")?, [TokenKind::Variable, TokenKind::Variable]);

        Ok(())
    }

    #[test]
    fn invalid_character_stops_scan() {
        let mut scanner = scan("A $ B");

        assert_eq!(scanner.next(), Some(Ok(Token::new(TokenKind::Variable, "A", 0))));
        assert_eq!(
            scanner.next(),
            Some(Err(ScanError::InvalidCharacter {
                character: '$',
                position: 2
            }))
        );
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn lone_slash_is_invalid() {
        let error = kinds("A / B").unwrap_err();

        assert_eq!(
            error,
            ScanError::InvalidCharacter {
                character: '/',
                position: 2
            }
        );
        assert_eq!(error.position(), 2);
    }

    #[test]
    fn restart_replays_tokens() -> Result<(), Box<dyn Error>> {
        let mut scanner = scan("p | q");
        let first = scanner.by_ref().collect::<Result<Vec<_>, _>>()?;

        assert_eq!(scanner.next(), None);

        scanner.restart();
        assert_eq!(scanner.source(), "p | q");

        let second = scanner.collect::<Result<Vec<_>, _>>()?;

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);

        Ok(())
    }
}
