use std::fmt::{Display, Formatter};

/// Lexical category of a [`Token`].
///
/// The declaration order is the order in which the scanner tries each kind at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// `~` or `¬`
    Not,
    /// `&`, `∧`, `∙` or `/\`
    And,
    /// `|`, `∨` or `\/`
    Or,
    /// `>`, `→`, `⇒` or `⊃`
    Implies,
    LeftParen,
    RightParen,
    /// A maximal run of letters
    Variable,
    /// A maximal run of whitespace. Never emitted by the scanner.
    Whitespace,
}

impl TokenKind {
    /// Every token kind, in scanning priority order.
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Not,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Implies,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::Variable,
        TokenKind::Whitespace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Not => "NOT",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Implies => "IMPLIES",
            TokenKind::LeftParen => "PARENTHESIS_LEFT",
            TokenKind::RightParen => "PARENTHESIS_RIGHT",
            TokenKind::Variable => "VARIABLE",
            TokenKind::Whitespace => "WHITESPACE",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexeme classified as a kind of lexical unit.
///
/// `position` is the zero-based offset of the first character of the lexeme, counted in
/// characters rather than bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub(crate) fn into_lexeme(self) -> String {
        self.lexeme
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lexeme)
    }
}
