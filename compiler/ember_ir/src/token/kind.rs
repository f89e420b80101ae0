//! Token type taxonomy.

use std::fmt;

/// Token type with a semantic range layout.
///
/// | Range   | Category    |
/// |---------|-------------|
/// | 0-9     | Trivia      |
/// | 10-29   | Literals    |
/// | 30-59   | Operators   |
/// | 60-89   | Punctuation |
/// | 90-119  | Keywords    |
/// | 120-127 | Error       |
///
/// Category checks are single range comparisons on the discriminant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenType {
    // === Trivia (0-9) ===
    Whitespace = 0,
    Newline = 1,
    Comment = 2,

    // === Literals (10-29) ===
    Integer = 10,
    Float = 11,
    String = 12,
    Identifier = 13,

    // === Operators (30-59) ===
    Plus = 30,
    Minus = 31,
    Star = 32,
    Slash = 33,
    Percent = 34,
    Bang = 35,
    Assign = 36,
    EqEq = 37,
    NotEq = 38,
    Lt = 39,
    LtEq = 40,
    Gt = 41,
    GtEq = 42,
    AndAnd = 43,
    OrOr = 44,

    // === Punctuation (60-89) ===
    LParen = 60,
    RParen = 61,
    LBrace = 62,
    RBrace = 63,
    LBracket = 64,
    RBracket = 65,
    Comma = 66,
    Semicolon = 67,
    Colon = 68,
    Dot = 69,
    Pipe = 70,
    Arrow = 71,

    // === Keywords (90-119) ===
    On = 90,
    Fn = 91,
    Let = 92,
    Type = 93,
    If = 94,
    Else = 95,
    While = 96,
    Return = 97,
    Break = 98,
    Continue = 99,
    True = 100,
    False = 101,
    Null = 102,

    // === Error (120-127) ===
    Unknown = 120,
}

impl TokenType {
    const TRIVIA_END: u8 = 10;
    const LITERAL_END: u8 = 30;
    const OPERATOR_END: u8 = 60;
    const PUNCTUATION_END: u8 = 90;
    const KEYWORD_END: u8 = 120;

    /// Highest discriminant; recovery bitsets rely on this fitting in 128 bits.
    pub const MAX_DISCRIMINANT: u8 = 127;

    #[inline]
    pub const fn discriminant(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_trivia(self) -> bool {
        (self as u8) < Self::TRIVIA_END
    }

    #[inline]
    pub const fn is_literal(self) -> bool {
        let d = self as u8;
        d >= Self::TRIVIA_END && d < Self::LITERAL_END
    }

    #[inline]
    pub const fn is_operator(self) -> bool {
        let d = self as u8;
        d >= Self::LITERAL_END && d < Self::OPERATOR_END
    }

    #[inline]
    pub const fn is_punctuation(self) -> bool {
        let d = self as u8;
        d >= Self::OPERATOR_END && d < Self::PUNCTUATION_END
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        let d = self as u8;
        d >= Self::PUNCTUATION_END && d < Self::KEYWORD_END
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        (self as u8) >= Self::KEYWORD_END
    }

    /// Whitespace and newlines: the only tokens that are safe restart points
    /// for incremental re-lexing.
    #[inline]
    pub const fn is_layout(self) -> bool {
        matches!(self, TokenType::Whitespace | TokenType::Newline)
    }

    /// Keyword lookup for a scanned identifier.
    pub fn keyword(text: &str) -> Option<TokenType> {
        Some(match text {
            "on" => TokenType::On,
            "fn" => TokenType::Fn,
            "let" => TokenType::Let,
            "type" => TokenType::Type,
            "if" => TokenType::If,
            "else" => TokenType::Else,
            "while" => TokenType::While,
            "return" => TokenType::Return,
            "break" => TokenType::Break,
            "continue" => TokenType::Continue,
            "true" => TokenType::True,
            "false" => TokenType::False,
            "null" => TokenType::Null,
            _ => return None,
        })
    }

    /// Human-readable name used in diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenType::Whitespace => "whitespace",
            TokenType::Newline => "newline",
            TokenType::Comment => "comment",
            TokenType::Integer => "integer",
            TokenType::Float => "float",
            TokenType::String => "string",
            TokenType::Identifier => "identifier",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::Percent => "%",
            TokenType::Bang => "!",
            TokenType::Assign => "=",
            TokenType::EqEq => "==",
            TokenType::NotEq => "!=",
            TokenType::Lt => "<",
            TokenType::LtEq => "<=",
            TokenType::Gt => ">",
            TokenType::GtEq => ">=",
            TokenType::AndAnd => "&&",
            TokenType::OrOr => "||",
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::LBrace => "{",
            TokenType::RBrace => "}",
            TokenType::LBracket => "[",
            TokenType::RBracket => "]",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::Colon => ":",
            TokenType::Dot => ".",
            TokenType::Pipe => "|",
            TokenType::Arrow => "->",
            TokenType::On => "on",
            TokenType::Fn => "fn",
            TokenType::Let => "let",
            TokenType::Type => "type",
            TokenType::If => "if",
            TokenType::Else => "else",
            TokenType::While => "while",
            TokenType::Return => "return",
            TokenType::Break => "break",
            TokenType::Continue => "continue",
            TokenType::True => "true",
            TokenType::False => "false",
            TokenType::Null => "null",
            TokenType::Unknown => "unknown character",
        }
    }
}

impl fmt::Debug for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Whitespace => "Whitespace",
            TokenType::Newline => "Newline",
            TokenType::Comment => "Comment",
            TokenType::Integer => "Integer",
            TokenType::Float => "Float",
            TokenType::String => "String",
            TokenType::Identifier => "Identifier",
            TokenType::Unknown => "Unknown",
            other => return write!(f, "`{}`", other.describe()),
        };
        f.write_str(name)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
