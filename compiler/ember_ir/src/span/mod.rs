//! Source coordinates.
//!
//! Two views of the same region are kept side by side: a byte [`Span`] for
//! slicing the backing text and a line/column [`Range`] for presentation.
//! Lines are 1-based, columns are 0-based byte offsets within the line, and
//! both ends are exclusive.

use std::fmt;

/// Error when a byte offset does not fit the 32-bit span representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    #[error("span start {0} exceeds u32::MAX")]
    StartTooLarge(usize),
    #[error("span end {0} exceeds u32::MAX")]
    EndTooLarge(usize),
}

/// Byte range `[start, end)` into the backing text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Fallible conversion from a `usize` range.
    pub fn try_from_range(range: std::ops::Range<usize>) -> Result<Self, SpanError> {
        let start =
            u32::try_from(range.start).map_err(|_| SpanError::StartTooLarge(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| SpanError::EndTooLarge(range.end))?;
        Ok(Span { start, end })
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an offset is within this span.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Merge two spans into one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Zero-length span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub fn to_range(self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A line/column position. Lines start at 1, columns at 0.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    /// The first position of any document.
    pub const START: Position = Position { line: 1, col: 0 };

    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }

    /// Position reached after scanning `text` starting from `self`.
    #[must_use]
    pub fn advance_over(self, text: &str) -> Position {
        match text.rfind('\n') {
            Some(last) => {
                let newlines = text.bytes().filter(|&b| b == b'\n').count();
                Position {
                    line: self.line + to_u32(newlines),
                    col: to_u32(text.len() - last - 1),
                }
            }
            None => Position {
                line: self.line,
                col: self.col + to_u32(text.len()),
            },
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Line/column range, end-exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }

    /// Check if `pos` falls inside the range (end-exclusive).
    ///
    /// An empty range contains its own start so that zero-width nodes can
    /// still be found by position queries.
    pub fn contains(&self, pos: Position) -> bool {
        if self.start == self.end {
            return pos == self.start;
        }
        self.start <= pos && pos < self.end
    }

    #[must_use]
    pub fn merge(self, other: Range) -> Range {
        Range {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.start, self.end)
    }
}

/// A region of source in both byte and line/column form.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct Location {
    pub span: Span,
    pub range: Range,
}

impl Location {
    #[inline]
    pub const fn new(span: Span, range: Range) -> Self {
        Location { span, range }
    }

    /// Zero-width location at a single point.
    pub const fn point(offset: u32, pos: Position) -> Self {
        Location {
            span: Span::point(offset),
            range: Range { start: pos, end: pos },
        }
    }

    #[must_use]
    pub fn merge(self, other: Location) -> Location {
        Location {
            span: self.span.merge(other.span),
            range: self.range.merge(other.range),
        }
    }
}

/// Saturating `usize` → `u32` for lengths bounded by a `u32`-sized source.
#[inline]
pub(crate) fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
