//! Lazily applied coordinate shifts.
//!
//! An edit to the token stream moves every token after the edited region.
//! Rewriting all of those tokens would make each keystroke O(tokens), so
//! the stream instead appends one [`Mutation`] to a shared [`EditChain`].
//! Every token remembers how much of the chain it has already applied and
//! catches up the next time one of its coordinates is read.
//!
//! Application is monotonic: a token never re-applies a mutation it has
//! already moved past.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Position;

/// One coordinate shift recorded by an edit.
///
/// Every placement whose start byte is at or after `byte_pos` moves by
/// `byte_offset` bytes and `line_offset` lines. A position that sits on line
/// `line_pos` (the line the removed region ended on) additionally moves by
/// `col_offset` columns, because the text before it on that line changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mutation {
    pub byte_pos: u32,
    pub byte_offset: i64,
    pub line_pos: u32,
    pub line_offset: i64,
    pub col_offset: i64,
}

impl Mutation {
    /// Describe replacing `[removed_start, removed_end)` with `inserted`.
    ///
    /// `removed_start_pos` and `removed_end_pos` are the line/column
    /// coordinates of the two removal boundaries.
    pub fn replacing(
        removed_start: u32,
        removed_end: u32,
        removed_start_pos: Position,
        removed_end_pos: Position,
        inserted: &str,
    ) -> Self {
        let inserted_end = removed_start_pos.advance_over(inserted);
        let inserted_len = i64::try_from(inserted.len()).unwrap_or(i64::MAX);
        Mutation {
            byte_pos: removed_end,
            byte_offset: inserted_len - i64::from(removed_end - removed_start),
            line_pos: removed_end_pos.line,
            line_offset: i64::from(inserted_end.line) - i64::from(removed_end_pos.line),
            col_offset: i64::from(inserted_end.col) - i64::from(removed_end_pos.col),
        }
    }

    /// True if a placement starting at `offset` is moved by this mutation.
    #[inline]
    pub fn affects(&self, offset: u32) -> bool {
        offset >= self.byte_pos
    }

    fn shift_offset(&self, offset: u32) -> u32 {
        shift(offset, self.byte_offset)
    }

    fn shift_position(&self, pos: Position) -> Position {
        let col = if pos.line == self.line_pos {
            shift(pos.col, self.col_offset)
        } else {
            pos.col
        };
        Position {
            line: shift(pos.line, self.line_offset),
            col,
        }
    }
}

#[inline]
fn shift(value: u32, by: i64) -> u32 {
    let moved = i64::from(value) + by;
    u32::try_from(moved.max(0)).unwrap_or(u32::MAX)
}

/// Resolved coordinates of a token at some point in the chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub start: u32,
    pub start_pos: Position,
    pub end_pos: Position,
}

impl Placement {
    /// Apply one mutation in place.
    pub fn apply(&mut self, mutation: &Mutation) {
        if !mutation.affects(self.start) {
            return;
        }
        self.start = mutation.shift_offset(self.start);
        self.start_pos = mutation.shift_position(self.start_pos);
        self.end_pos = mutation.shift_position(self.end_pos);
    }
}

/// Shared, append-only list of pending mutations.
///
/// Cloning an `EditChain` clones the handle, not the list.
#[derive(Clone, Default)]
pub struct EditChain(Rc<RefCell<Vec<Mutation>>>);

impl EditChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutations recorded so far.
    ///
    /// A token created now stores this as its cursor and never applies
    /// anything older.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn push(&self, mutation: Mutation) {
        self.0.borrow_mut().push(mutation);
    }

    /// Apply every mutation from `cursor` onward to `placement`.
    ///
    /// Returns the new cursor (the chain length).
    pub fn catch_up(&self, cursor: usize, placement: &mut Placement) -> usize {
        let chain = self.0.borrow();
        for mutation in chain.iter().skip(cursor) {
            placement.apply(mutation);
        }
        chain.len()
    }
}

impl std::fmt::Debug for EditChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditChain").field("len", &self.len()).finish()
    }
}
