use std::error::Error;
use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::scanner::ScanError;
use crate::token::{Token, TokenKind};

/// Error produced when the token sequence does not form exactly one well-formed formula.
///
/// `found` is the offending token, or `None` when the end of the input was reached. `expected`
/// is set when a specific token kind was required at that point, such as a closing parenthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    found: Option<Token>,
    expected: Option<TokenKind>,
}

impl SyntaxError {
    pub(crate) fn unexpected(found: Option<Token>) -> Self {
        Self { found, expected: None }
    }

    pub(crate) fn expected(expected: TokenKind, found: Option<Token>) -> Self {
        Self {
            found,
            expected: Some(expected),
        }
    }

    pub fn found(&self) -> Option<&Token> {
        self.found.as_ref()
    }

    pub fn expected_kind(&self) -> Option<TokenKind> {
        self.expected
    }

    pub fn is_end_of_input(&self) -> bool {
        self.found.is_none()
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.found {
            Some(token) => write!(
                f,
                "Unexpected token \"{}\" at position {}",
                token.lexeme(),
                token.position()
            )?,
            None => write!(f, "Unexpected end of input")?,
        }

        if let Some(kind) = self.expected {
            write!(f, ": expected {}", kind)?;
        }

        Ok(())
    }
}

impl Error for SyntaxError {}

/// Error produced while turning a formula into an abstract syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    InvalidCharacter(#[from] ScanError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, ParseError::Syntax(_))
    }

    pub fn is_invalid_character(&self) -> bool {
        matches!(self, ParseError::InvalidCharacter(_))
    }
}
