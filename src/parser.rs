//! Operator-precedence parser for propositional formulas.
//!
//! Terms (variables, parenthesized groups and unary formulas) are parsed by recursive descent.
//! Binary formulas are parsed by precedence climbing: after a term has been parsed, a following
//! binary connective is only consumed if its precedence exceeds the current minimum, and its right
//! operand absorbs every connective that binds more tightly than it does. Connectives of equal
//! precedence therefore associate to the left, while chained unary connectives nest to the right.
//!
//! ```rust
//! use proplogic::parser::parse;
//! use proplogic::scanner::scan;
//!
//! let tokens = scan("~A & B | C").collect::<Result<Vec<_>, _>>().unwrap();
//! let formula = parse(tokens).unwrap();
//!
//! assert_eq!(formula.to_string(), "((¬A ∧ B) ∨ C)");
//! ```

mod errors;

use std::iter::Fuse;
use std::str::FromStr;

use tracing::trace;

pub use errors::{ParseError, SyntaxError};

use crate::connectives::{ConnectiveRegistry, UnaryConnective};
use crate::formula::{Formula, Variable};
use crate::scanner::{scan, ScanError};
use crate::token::{Token, TokenKind};

/// Recursive descent parser over a sequence of tokens with a single token of lookahead.
///
/// The token sequence may be produced lazily by a [`Scanner`](crate::scanner::Scanner). Tokens
/// are only pulled from it as the parser advances, so a scan error is reported at the point the
/// parser reaches it.
pub struct Parser<'r, I>
where
    I: Iterator<Item = Result<Token, ScanError>>,
{
    tokens: Fuse<I>,
    token: Option<Token>,
    registry: &'r ConnectiveRegistry,
}

impl<I> Parser<'static, I>
where
    I: Iterator<Item = Result<Token, ScanError>>,
{
    /// Create a parser using the built-in connectives.
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self::with_registry(tokens, ConnectiveRegistry::standard())
    }
}

impl<'r, I> Parser<'r, I>
where
    I: Iterator<Item = Result<Token, ScanError>>,
{
    /// Create a parser which recognizes only the connectives present in `registry`.
    pub fn with_registry<T>(tokens: T, registry: &'r ConnectiveRegistry) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            tokens: tokens.into_iter().fuse(),
            token: None,
            registry,
        }
    }

    /// Parse the whole token sequence into a single formula.
    ///
    /// Fails if the tokens do not form a well-formed formula, or if any token remains after one.
    pub fn parse(mut self) -> Result<Formula, ParseError> {
        self.advance()?;

        let formula = self.parse_formula()?;

        match self.token.take() {
            Some(token) => Err(SyntaxError::unexpected(Some(token)).into()),
            None => Ok(formula),
        }
    }

    /// Move the lookahead to the next token and return the previous one.
    fn advance(&mut self) -> Result<Option<Token>, ScanError> {
        let next = self.tokens.next().transpose()?;
        Ok(std::mem::replace(&mut self.token, next))
    }

    /// Consume and return the current token if it is of the given kind.
    fn accept(&mut self, kind: TokenKind) -> Result<Option<Token>, ScanError> {
        match &self.token {
            Some(token) if token.is(kind) => {
                trace!(%kind, position = token.position(), "accepted token");
                self.advance()
            }
            _ => Ok(None),
        }
    }

    /// Same as [`Parser::accept`], but a mismatch is a syntax error.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.accept(kind)? {
            Some(token) => Ok(token),
            None => Err(SyntaxError::expected(kind, self.token.clone()).into()),
        }
    }

    /// Parse a term followed by any number of binary connectives.
    fn parse_formula(&mut self) -> Result<Formula, ParseError> {
        let left = self.parse_term()?;
        self.parse_binary(left, 0)
    }

    /// Parse a variable, a parenthesized formula or a unary formula.
    fn parse_term(&mut self) -> Result<Formula, ParseError> {
        if let Some(token) = self.accept(TokenKind::Variable)? {
            return Ok(Variable::from_lexeme(token.into_lexeme()).into());
        }

        if self.accept(TokenKind::LeftParen)?.is_some() {
            return self.parse_group();
        }

        if let Some(connective) = self.registry.unary(self.token.as_ref()) {
            return self.parse_unary(connective);
        }

        Err(SyntaxError::unexpected(self.token.clone()).into())
    }

    fn parse_group(&mut self) -> Result<Formula, ParseError> {
        let formula = self.parse_formula()?;
        self.expect(TokenKind::RightParen)?;

        Ok(formula)
    }

    fn parse_unary(&mut self, connective: UnaryConnective) -> Result<Formula, ParseError> {
        // Consume the connective token
        self.advance()?;

        let operand = self.parse_term()?;
        Ok(Formula::unary(connective, operand))
    }

    /// Extend `left` into a binary formula while the current token is a binary connective with a
    /// precedence greater than `min_precedence`, otherwise return `left` as-is.
    ///
    /// Recursion only descends into right operands of tighter connectives. Each further
    /// connective at this level is folded into `left` by the loop.
    fn parse_binary(&mut self, mut left: Formula, min_precedence: u8) -> Result<Formula, ParseError> {
        loop {
            let connective = match self.registry.binary(self.token.as_ref()) {
                Some(connective) if connective.precedence() > min_precedence => connective,
                _ => return Ok(left),
            };

            // Consume the connective token
            self.advance()?;

            let term = self.parse_term()?;
            let right = self.parse_binary(term, connective.precedence())?;
            left = Formula::binary(left, connective, right);

            trace!(connective = connective.name(), min_precedence, "built binary formula");
        }
    }
}

/// Parse a sequence of tokens into a formula using the built-in connectives.
pub fn parse<T>(tokens: T) -> Result<Formula, ParseError>
where
    T: IntoIterator<Item = Token>,
{
    Parser::new(tokens.into_iter().map(Ok::<Token, ScanError>)).parse()
}

/// Scan and parse a formula from a string.
pub fn parse_formula(input: &str) -> Result<Formula, ParseError> {
    Parser::new(scan(input)).parse()
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_formula(s)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{parse, parse_formula, ParseError, Parser, SyntaxError};
    use crate::connectives::{BinaryConnective, ConnectiveRegistry, UnaryConnective};
    use crate::formula::Formula;
    use crate::scanner::{scan, ScanError};
    use crate::token::{Token, TokenKind};

    fn var(name: &str) -> Formula {
        Formula::variable(name).unwrap()
    }

    #[test]
    fn parse_variable() -> Result<(), Box<dyn Error>> {
        assert_eq!(parse_formula("Rain")?, var("Rain"));
        assert_eq!(parse_formula("  ((p))  ")?, var("p"));

        Ok(())
    }

    #[test]
    fn parse_tokens() -> Result<(), Box<dyn Error>> {
        let tokens = [
            Token::new(TokenKind::Not, "~", 0),
            Token::new(TokenKind::Variable, "A", 1),
            Token::new(TokenKind::Or, "|", 3),
            Token::new(TokenKind::Variable, "B", 5),
        ];
        let expected = Formula::or(Formula::not(var("A")), var("B"));

        assert_eq!(parse(tokens)?, expected);
        Ok(())
    }

    #[test]
    fn precedence_climbing() -> Result<(), Box<dyn Error>> {
        let expected = Formula::or(var("A"), Formula::and(var("B"), var("C")));
        assert_eq!(parse_formula("A | B & C")?, expected);

        let expected = Formula::implies(var("A"), Formula::or(var("B"), var("C")));
        assert_eq!(parse_formula("A > B | C")?, expected);

        let expected = Formula::implies(Formula::or(var("A"), Formula::and(var("B"), var("C"))), var("D"));
        assert_eq!(parse_formula("A | B & C > D")?, expected);

        Ok(())
    }

    #[test]
    fn implication_associates_left() -> Result<(), Box<dyn Error>> {
        let expected = Formula::implies(Formula::implies(var("A"), var("B")), var("C"));
        assert_eq!(parse_formula("A > B > C")?, expected);

        Ok(())
    }

    #[test]
    fn long_flat_chain() -> Result<(), Box<dyn Error>> {
        let length = 5000;
        let source = vec!["A"; length].join(" & ");
        let formula = parse_formula(&source)?;

        let mut conjunctions = 0;
        let mut node = &formula;

        while let Formula::Binary(binary) = node {
            assert_eq!(binary.connective(), BinaryConnective::Conjunction);
            assert_eq!(binary.right(), &var("A"));

            conjunctions += 1;
            node = binary.left();
        }

        assert_eq!(node, &var("A"));
        assert_eq!(conjunctions, length - 1);

        Ok(())
    }

    #[test]
    fn negation_of_group() -> Result<(), Box<dyn Error>> {
        let expected = Formula::not(Formula::and(var("A"), var("B")));
        assert_eq!(parse_formula("¬(A ∧ B)")?, expected);

        Ok(())
    }

    #[test]
    fn empty_input() {
        let error = parse_formula("").unwrap_err();
        assert_eq!(error, ParseError::Syntax(SyntaxError::unexpected(None)));

        let error = parse_formula("   ").unwrap_err();
        assert!(error.is_syntax_error());
    }

    #[test]
    fn missing_operands() {
        let error = parse_formula("A &").unwrap_err();
        assert_eq!(error, ParseError::Syntax(SyntaxError::unexpected(None)));

        let error = parse_formula("& A").unwrap_err();
        let found = Token::new(TokenKind::And, "&", 0);
        assert_eq!(error, ParseError::Syntax(SyntaxError::unexpected(Some(found))));

        let error = parse_formula("~").unwrap_err();
        assert!(error.is_syntax_error());
    }

    #[test]
    fn unbalanced_parentheses() {
        let error = parse_formula("(A").unwrap_err();
        let expected = SyntaxError::expected(TokenKind::RightParen, None);
        assert_eq!(error, ParseError::Syntax(expected));

        let error = parse_formula("(A B)").unwrap_err();
        let found = Token::new(TokenKind::Variable, "B", 3);
        let expected = SyntaxError::expected(TokenKind::RightParen, Some(found));
        assert_eq!(error, ParseError::Syntax(expected));

        let error = parse_formula("A)").unwrap_err();
        let found = Token::new(TokenKind::RightParen, ")", 1);
        assert_eq!(error, ParseError::Syntax(SyntaxError::unexpected(Some(found))));

        let error = parse_formula(")").unwrap_err();
        assert!(error.is_syntax_error());

        let error = parse_formula("()").unwrap_err();
        assert!(error.is_syntax_error());
    }

    #[test]
    fn stray_token() {
        let error = parse_formula("A B").unwrap_err();
        let found = Token::new(TokenKind::Variable, "B", 2);

        assert_eq!(error, ParseError::Syntax(SyntaxError::unexpected(Some(found))));
    }

    #[test]
    fn scan_errors_are_lazy() {
        let error = parse_formula("A $ B").unwrap_err();
        let expected = ScanError::InvalidCharacter {
            character: '$',
            position: 2,
        };
        assert_eq!(error, ParseError::InvalidCharacter(expected));

        // The parser stops at the stray token before the scanner reaches the bad character
        let error = parse_formula("A B $").unwrap_err();
        assert!(error.is_syntax_error());
    }

    #[test]
    fn restricted_registry() -> Result<(), Box<dyn Error>> {
        let registry = ConnectiveRegistry::new([
            UnaryConnective::Negation.into(),
            BinaryConnective::Conjunction.into(),
        ])?;

        let formula = Parser::with_registry(scan("~p & q"), &registry).parse()?;
        assert_eq!(formula, Formula::and(Formula::not(var("p")), var("q")));

        let error = Parser::with_registry(scan("p | q"), &registry).parse().unwrap_err();
        let found = Token::new(TokenKind::Or, "|", 2);
        assert_eq!(error, ParseError::Syntax(SyntaxError::unexpected(Some(found))));

        Ok(())
    }

    #[test]
    fn from_str() -> Result<(), Box<dyn Error>> {
        let formula: Formula = "p ⇒ q".parse()?;
        assert_eq!(formula, Formula::implies(var("p"), var("q")));

        Ok(())
    }
}
