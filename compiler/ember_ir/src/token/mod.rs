//! Tokens with lazily rectified coordinates.
//!
//! A [`Token`] is created once by the stream and never rebuilt while its
//! text stays in the document. Its byte length is fixed; its absolute
//! position is derived from the placement recorded at creation plus every
//! [`Mutation`](crate::Mutation) appended to the shared chain since, up to
//! the point the token is [detached](Token::detach).

mod kind;

use std::cell::Cell;
use std::fmt;

use crate::edit_chain::Placement;
use crate::span::to_u32;
use crate::{EditChain, Location, Position, Range, Span};

pub use kind::TokenType;

/// Stable token identity.
///
/// Ids are handed out by the stream in creation order and survive edits for
/// tokens that are kept by reference, so they can key caches that must
/// outlive a mutation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TokenId(u64);

impl TokenId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        TokenId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        TokenId(self.0 + 1)
    }
}

/// One lexical token.
pub struct Token {
    id: TokenId,
    kind: TokenType,
    content: Box<str>,
    chain: EditChain,
    cursor: Cell<usize>,
    placement: Cell<Placement>,
    detached: Cell<bool>,
}

impl Token {
    /// Create a token at `start`/`start_pos` in the current coordinates of
    /// `chain`. Mutations already on the chain are never applied to it.
    pub fn new(
        id: TokenId,
        kind: TokenType,
        content: impl Into<Box<str>>,
        start: u32,
        start_pos: Position,
        chain: &EditChain,
    ) -> Self {
        let content = content.into();
        let end_pos = start_pos.advance_over(&content);
        Token {
            id,
            kind,
            content,
            chain: chain.clone(),
            cursor: Cell::new(chain.len()),
            placement: Cell::new(Placement {
                start,
                start_pos,
                end_pos,
            }),
            detached: Cell::new(false),
        }
    }

    #[inline]
    pub fn id(&self) -> TokenId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> TokenType {
        self.kind
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Byte length. Never changes after creation.
    #[inline]
    pub fn len(&self) -> u32 {
        to_u32(self.content.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Stop following the chain. The token keeps the coordinates it has
    /// now; later mutations no longer move it.
    ///
    /// The stream detaches every token it retires, so trees built from an
    /// earlier revision keep that revision's coordinates.
    pub fn detach(&self) {
        self.resolve();
        self.detached.set(true);
    }

    fn resolve(&self) -> Placement {
        let mut placement = self.placement.get();
        let cursor = self.cursor.get();
        if !self.detached.get() && cursor < self.chain.len() {
            let advanced = self.chain.catch_up(cursor, &mut placement);
            self.placement.set(placement);
            self.cursor.set(advanced);
        }
        placement
    }

    pub fn start(&self) -> u32 {
        self.resolve().start
    }

    pub fn end(&self) -> u32 {
        self.start() + self.len()
    }

    pub fn span(&self) -> Span {
        let start = self.start();
        Span::new(start, start + self.len())
    }

    pub fn start_pos(&self) -> Position {
        self.resolve().start_pos
    }

    pub fn end_pos(&self) -> Position {
        self.resolve().end_pos
    }

    pub fn range(&self) -> Range {
        let placement = self.resolve();
        Range::new(placement.start_pos, placement.end_pos)
    }

    pub fn location(&self) -> Location {
        let placement = self.resolve();
        Location::new(
            Span::new(placement.start, placement.start + self.len()),
            Range::new(placement.start_pos, placement.end_pos),
        )
    }

    /// Zero-width location just past the end of this token.
    pub fn end_location(&self) -> Location {
        let placement = self.resolve();
        Location::point(placement.start + self.len(), placement.end_pos)
    }
}

/// Tokens compare by what they are and where they currently sit; identity
/// and edit-chain bookkeeping are ignored.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.content == other.content
            && self.location() == other.location()
    }
}

impl Eq for Token {}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} @{:?}", self.kind, &*self.content, self.span())
    }
}
