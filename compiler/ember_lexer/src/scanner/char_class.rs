//! ASCII character classes for the scanner's first-byte dispatch.

/// What a token starting with a given ASCII byte can be.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CharClass {
    /// Space, tab, carriage return.
    Whitespace,
    Newline,
    Digit,
    /// `a-z`, `A-Z`, `_`.
    IdentStart,
    Quote,
    /// `/`: division or the start of a comment.
    Slash,
    /// Bytes that start an operator, including `|` and `&`.
    Operator,
    Punctuation,
    Invalid,
}

const fn classify(byte: u8) -> CharClass {
    match byte {
        b' ' | b'\t' | b'\r' => CharClass::Whitespace,
        b'\n' => CharClass::Newline,
        b'0'..=b'9' => CharClass::Digit,
        b'a'..=b'z' | b'A'..=b'Z' | b'_' => CharClass::IdentStart,
        b'"' => CharClass::Quote,
        b'/' => CharClass::Slash,
        b'+' | b'-' | b'*' | b'%' | b'!' | b'=' | b'<' | b'>' | b'&' | b'|' => CharClass::Operator,
        b'(' | b')' | b'{' | b'}' | b'[' | b']' | b',' | b';' | b':' | b'.' => {
            CharClass::Punctuation
        }
        _ => CharClass::Invalid,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "index is bounded by the 128-entry table"
)]
static CHAR_CLASS: [CharClass; 128] = {
    let mut table = [CharClass::Invalid; 128];
    let mut i = 0;
    while i < 128 {
        table[i] = classify(i as u8);
        i += 1;
    }
    table
};

/// Class of an ASCII byte. Bytes >= 0x80 must be handled by the caller.
#[inline]
pub fn class_of(byte: u8) -> CharClass {
    CHAR_CLASS
        .get(usize::from(byte))
        .copied()
        .unwrap_or(CharClass::Invalid)
}

/// True for bytes that may continue an ASCII identifier.
#[inline]
pub fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
