use std::fmt;

/// Classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An unsigned decimal number literal.
    Number,
    /// One of the binary operators `-`, `+`, `&`, `|`, `^`.
    Operator,
}

/// A lexed token: its kind and the exact text it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn number(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Number,
            text: text.into(),
        }
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Operator,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number => write!(f, "number({})", self.text),
            TokenKind::Operator => write!(f, "operator({})", self.text),
        }
    }
}
