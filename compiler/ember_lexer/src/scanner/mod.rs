//! Hand-written scanner producing one `(TokenType, len)` pair at a time.
//!
//! The scanner is stateless between tokens: the token produced at an
//! offset depends only on the text from that offset onward. The token
//! stream relies on this to restart scanning at any token boundary after
//! an edit.
//!
//! Error conditions never stop the scan. They are attached to the token
//! they were found in as an [`ErrorCode`].

mod char_class;

use ember_diagnostic::ErrorCode;
use ember_ir::TokenType;

pub use char_class::{class_of, CharClass};
use char_class::is_ident_continue;

/// One scanned token.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RawToken {
    pub kind: TokenType,
    /// Length in bytes.
    pub len: usize,
    /// Lexical error found inside this token.
    pub error: Option<ErrorCode>,
}

pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner { src, pos: 0 }
    }

    /// Start scanning at `offset`, which must be a token boundary.
    pub fn at(src: &'a str, offset: usize) -> Self {
        Scanner { src, pos: offset }
    }

    /// Byte offset of the next token.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    /// Byte `n` positions ahead, or 0 past the end.
    #[inline]
    fn peek(&self, n: usize) -> u8 {
        self.bytes().get(self.pos + n).copied().unwrap_or(0)
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.src.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<RawToken> {
        let start = self.pos;
        let byte = *self.bytes().get(start)?;
        let (kind, error) = if byte.is_ascii() {
            match class_of(byte) {
                CharClass::Whitespace => self.whitespace(byte),
                CharClass::Newline => {
                    self.pos += 1;
                    (TokenType::Newline, None)
                }
                CharClass::Digit => self.number(),
                CharClass::IdentStart => self.identifier(),
                CharClass::Quote => self.string(),
                CharClass::Slash => self.slash(),
                CharClass::Operator => self.operator(byte),
                CharClass::Punctuation => self.punctuation(byte),
                CharClass::Invalid => {
                    self.pos += 1;
                    (TokenType::Unknown, Some(ErrorCode::E0002))
                }
            }
        } else {
            self.non_ascii()
        };
        Some(RawToken {
            kind,
            len: self.pos - start,
            error,
        })
    }

    // ─── Layout ─────────────────────────────────────────────────────

    fn whitespace(&mut self, first: u8) -> (TokenType, Option<ErrorCode>) {
        if first == b'\r' && self.peek(1) == b'\n' {
            self.pos += 2;
            return (TokenType::Newline, None);
        }
        loop {
            match self.peek(0) {
                b' ' | b'\t' => self.pos += 1,
                b'\r' if self.peek(1) != b'\n' => self.pos += 1,
                _ => break,
            }
        }
        (TokenType::Whitespace, None)
    }

    // ─── Identifiers and numbers ────────────────────────────────────

    /// Consume identifier characters. Returns false if nothing was eaten.
    fn eat_ident_chars(&mut self) -> bool {
        let start = self.pos;
        loop {
            let byte = self.peek(0);
            if byte.is_ascii() {
                if byte != 0 && is_ident_continue(byte) {
                    self.pos += 1;
                    continue;
                }
                break;
            }
            match self.current_char() {
                Some(c) if c.is_alphabetic() => self.pos += c.len_utf8(),
                _ => break,
            }
        }
        self.pos > start
    }

    fn identifier(&mut self) -> (TokenType, Option<ErrorCode>) {
        let start = self.pos;
        self.eat_ident_chars();
        let kind = TokenType::keyword(&self.src[start..self.pos]).unwrap_or(TokenType::Identifier);
        (kind, None)
    }

    fn eat_digits(&mut self) {
        while self.peek(0).is_ascii_digit() {
            self.pos += 1;
        }
    }

    fn number(&mut self) -> (TokenType, Option<ErrorCode>) {
        let mut kind = TokenType::Integer;
        self.eat_digits();

        if self.peek(0) == b'.' && self.peek(1).is_ascii_digit() {
            self.pos += 1;
            self.eat_digits();
            kind = TokenType::Float;
        }

        if matches!(self.peek(0), b'e' | b'E') {
            let sign = usize::from(matches!(self.peek(1), b'+' | b'-'));
            if self.peek(1 + sign).is_ascii_digit() {
                self.pos += 1 + sign;
                self.eat_digits();
                kind = TokenType::Float;
            }
        }

        // `12abc`: one malformed token rather than a number and a name.
        let error = self.eat_ident_chars().then_some(ErrorCode::E0003);
        (kind, error)
    }

    fn non_ascii(&mut self) -> (TokenType, Option<ErrorCode>) {
        match self.current_char() {
            Some(c) if c.is_alphabetic() => self.identifier(),
            Some(c) => {
                self.pos += c.len_utf8();
                (TokenType::Unknown, Some(ErrorCode::E0002))
            }
            None => {
                self.pos += 1;
                (TokenType::Unknown, Some(ErrorCode::E0002))
            }
        }
    }

    // ─── Strings and comments ───────────────────────────────────────

    fn string(&mut self) -> (TokenType, Option<ErrorCode>) {
        self.pos += 1;
        loop {
            let rest = &self.bytes()[self.pos..];
            let Some(offset) = memchr::memchr3(b'"', b'\\', b'\n', rest) else {
                self.pos = self.src.len();
                return (TokenType::String, Some(ErrorCode::E0001));
            };
            self.pos += offset;
            match self.peek(0) {
                b'"' => {
                    self.pos += 1;
                    return (TokenType::String, None);
                }
                b'\\' => {
                    self.pos += 1;
                    // An escaped line break still ends the literal.
                    match self.current_char() {
                        Some('\n') | None => {}
                        Some(c) => self.pos += c.len_utf8(),
                    }
                }
                _ => return (TokenType::String, Some(ErrorCode::E0001)),
            }
        }
    }

    fn slash(&mut self) -> (TokenType, Option<ErrorCode>) {
        match self.peek(1) {
            b'/' => {
                let rest = &self.bytes()[self.pos..];
                self.pos += memchr::memchr(b'\n', rest).unwrap_or(rest.len());
                (TokenType::Comment, None)
            }
            b'*' => {
                self.pos += 2;
                let rest = &self.bytes()[self.pos..];
                match memchr::memmem::find(rest, b"*/") {
                    Some(offset) => {
                        self.pos += offset + 2;
                        (TokenType::Comment, None)
                    }
                    None => {
                        self.pos = self.src.len();
                        (TokenType::Comment, Some(ErrorCode::E0004))
                    }
                }
            }
            _ => {
                self.pos += 1;
                (TokenType::Slash, None)
            }
        }
    }

    // ─── Operators and punctuation ──────────────────────────────────

    fn single(&mut self, kind: TokenType) -> TokenType {
        self.pos += 1;
        kind
    }

    /// Emit `double` if the next byte is `second`, else `single`.
    fn one_or_two(&mut self, second: u8, double: TokenType, single: TokenType) -> TokenType {
        if self.peek(1) == second {
            self.pos += 2;
            double
        } else {
            self.pos += 1;
            single
        }
    }

    fn operator(&mut self, byte: u8) -> (TokenType, Option<ErrorCode>) {
        let kind = match byte {
            b'+' => self.single(TokenType::Plus),
            b'-' => self.one_or_two(b'>', TokenType::Arrow, TokenType::Minus),
            b'*' => self.single(TokenType::Star),
            b'%' => self.single(TokenType::Percent),
            b'!' => self.one_or_two(b'=', TokenType::NotEq, TokenType::Bang),
            b'=' => self.one_or_two(b'=', TokenType::EqEq, TokenType::Assign),
            b'<' => self.one_or_two(b'=', TokenType::LtEq, TokenType::Lt),
            b'>' => self.one_or_two(b'=', TokenType::GtEq, TokenType::Gt),
            b'|' => self.one_or_two(b'|', TokenType::OrOr, TokenType::Pipe),
            b'&' => {
                if self.peek(1) == b'&' {
                    self.pos += 2;
                    TokenType::AndAnd
                } else {
                    self.pos += 1;
                    return (TokenType::Unknown, Some(ErrorCode::E0002));
                }
            }
            _ => {
                self.pos += 1;
                return (TokenType::Unknown, Some(ErrorCode::E0002));
            }
        };
        (kind, None)
    }

    fn punctuation(&mut self, byte: u8) -> (TokenType, Option<ErrorCode>) {
        self.pos += 1;
        let kind = match byte {
            b'(' => TokenType::LParen,
            b')' => TokenType::RParen,
            b'{' => TokenType::LBrace,
            b'}' => TokenType::RBrace,
            b'[' => TokenType::LBracket,
            b']' => TokenType::RBracket,
            b',' => TokenType::Comma,
            b';' => TokenType::Semicolon,
            b':' => TokenType::Colon,
            b'.' => TokenType::Dot,
            _ => return (TokenType::Unknown, Some(ErrorCode::E0002)),
        };
        (kind, None)
    }
}

impl Iterator for Scanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        self.next_token()
    }
}
