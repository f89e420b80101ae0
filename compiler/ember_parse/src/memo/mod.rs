//! Memo table for incremental reuse.
//!
//! An entry records what one rule invocation did: the node it built, how
//! many raw tokens it consumed, the diagnostics it reported and the
//! comments it left unclaimed. Entries are keyed by the id of the raw token
//! at the cursor when the rule started, plus the rule and the active flags.
//!
//! The table outlives a parse. After an edit the stream keeps unaffected
//! tokens by reference, so their ids still find their entries. An entry is
//! only trusted when the tokens it examined are exactly the ones in the
//! stream now:
//!
//! - every token from the key through the furthest token the rule looked
//!   at predates the entry (its id is below the entry's watermark), and
//! - the furthest token is still the recorded one, at the same distance
//!   from the key (or end of input, when that is what the rule saw).
//!
//! Tokens created by an edit carry fresh ids, and removing tokens moves the
//! furthest one closer to the key, so either kind of change inside the
//! examined range fails the check.

use std::rc::Rc;

use ember_diagnostic::TrackedReport;
use ember_ir::ast::{Block, Definition, Expr, Stmt, Trivia, TypeExpr};
use ember_ir::{Token, TokenId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::{ParseFlags, Parser};

/// Grammar rules whose results are memoized.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Rule {
    Definition,
    Statement,
    Block,
    Expression,
    Type,
}

/// A memoized rule result.
#[derive(Clone, Debug)]
pub enum MemoNode {
    Definition(Rc<Definition>),
    Statement(Rc<Stmt>),
    Block(Rc<Block>),
    Expression(Rc<Expr>),
    Type(Rc<TypeExpr>),
    /// The rule did not match.
    NoMatch,
}

/// Nodes produced by memoized rules.
pub(crate) trait Memoized: Sized {
    const RULE: Rule;

    fn wrap(node: Rc<Self>) -> MemoNode;

    /// `None` if `node` belongs to a different rule.
    fn extract(node: &MemoNode) -> Option<Rc<Self>>;
}

macro_rules! memoized {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Memoized for $ty {
                const RULE: Rule = Rule::$variant;

                fn wrap(node: Rc<Self>) -> MemoNode {
                    MemoNode::$variant(node)
                }

                fn extract(node: &MemoNode) -> Option<Rc<Self>> {
                    match node {
                        MemoNode::$variant(node) => Some(Rc::clone(node)),
                        _ => None,
                    }
                }
            }
        )*
    };
}

memoized!(
    Definition => Definition,
    Stmt => Statement,
    Block => Block,
    Expr => Expression,
    TypeExpr => Type,
);

#[derive(Clone, Debug)]
pub struct MemoEntry {
    pub rule: Rule,
    pub flags: ParseFlags,
    pub node: MemoNode,
    /// Raw tokens consumed, trivia included.
    pub consumed: usize,
    /// Raw tokens examined from the key onwards, the key included.
    pub lookahead: usize,
    /// The furthest examined token; `None` when that was end of input.
    pub boundary: Option<TokenId>,
    /// The stream's next token id when the entry was stored.
    pub watermark: TokenId,
    pub reports: Vec<TrackedReport>,
    /// Comments passed over but not attached to any node.
    pub leftover: Trivia,
}

impl MemoEntry {
    /// Whether the entry still describes the stream at `key_index`.
    ///
    /// `token` looks up a raw token by index, reading further into the
    /// stream if needed.
    pub fn is_valid_at(
        &self,
        key_index: usize,
        mut token: impl FnMut(usize) -> Option<Rc<Token>>,
    ) -> bool {
        let reach = key_index + self.lookahead.saturating_sub(1);
        for index in key_index..=reach {
            let Some(token) = token(index) else {
                return index == reach && self.boundary.is_none();
            };
            if token.id() >= self.watermark {
                return false;
            }
            if index == reach && Some(token.id()) != self.boundary {
                return false;
            }
        }
        true
    }
}

/// Memo counters for one parse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Rule invocations answered from the memo.
    pub hits: usize,
    /// Rule invocations that ran the rule body.
    pub misses: usize,
    /// Entries dropped because their key token was consumed directly.
    pub evicted: usize,
    /// Entries in the table after the parse.
    pub entries: usize,
}

/// Persistent memo table.
#[derive(Default)]
pub struct MemoTable {
    entries: FxHashMap<TokenId, SmallVec<[MemoEntry; 2]>>,
    len: usize,
}

impl MemoTable {
    pub fn new() -> Self {
        MemoTable::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, key: TokenId, rule: Rule, flags: ParseFlags) -> Option<&MemoEntry> {
        self.entries
            .get(&key)?
            .iter()
            .find(|entry| entry.rule == rule && entry.flags == flags)
    }

    /// Store `entry`, replacing any entry for the same rule and flags.
    pub fn insert(&mut self, key: TokenId, entry: MemoEntry) {
        let bucket = self.entries.entry(key).or_default();
        if let Some(slot) = bucket
            .iter_mut()
            .find(|old| old.rule == entry.rule && old.flags == entry.flags)
        {
            *slot = entry;
        } else {
            bucket.push(entry);
            self.len += 1;
        }
    }

    /// Drop every entry keyed by `key`. Returns how many were dropped.
    pub fn evict(&mut self, key: TokenId) -> usize {
        let dropped = self.entries.remove(&key).map_or(0, |bucket| bucket.len());
        self.len -= dropped;
        dropped
    }

    /// Drop the entries of tokens that left the stream.
    pub fn forget(&mut self, removed: &[Rc<Token>]) -> usize {
        removed.iter().map(|token| self.evict(token.id())).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }
}

impl std::fmt::Debug for MemoTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoTable")
            .field("keys", &self.entries.len())
            .field("entries", &self.len)
            .finish()
    }
}

impl Parser<'_> {
    /// Run a memoized rule.
    ///
    /// A valid entry for the raw token at the cursor is replayed: the
    /// cursor skips what the rule consumed, its diagnostics and unclaimed
    /// comments are re-recorded and the cached node is returned. Otherwise
    /// `body` runs in its own frame and its outcome is stored.
    pub(crate) fn memoized<T: Memoized>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Option<Rc<T>>,
    ) -> Option<Rc<T>> {
        let start = self.pos;
        let Some(key) = self.raw(start).map(|token| token.id()) else {
            return body(self);
        };
        let flags = self.flags();

        if let Some(entry) = self.memo.get(key, T::RULE, flags).cloned() {
            let stream = &mut *self.stream;
            if entry.is_valid_at(start, |index| stream.token(index).cloned()) {
                trace!(rule = ?T::RULE, key = key.raw(), "memo hit");
                return self.replay(start, entry);
            }
        }

        trace!(rule = ?T::RULE, key = key.raw(), "memo miss");
        self.stats.misses += 1;
        let outer_seen = std::mem::replace(&mut self.max_seen, start);
        let reports_before = self.reporter.len();
        self.save();
        let node = body(self);
        let leftover = self.trivia.clone();
        self.commit();

        let reach = self.max_seen;
        let entry = MemoEntry {
            rule: T::RULE,
            flags,
            node: node.clone().map_or(MemoNode::NoMatch, T::wrap),
            consumed: self.pos - start,
            lookahead: reach - start + 1,
            boundary: self.stream.tokens().get(reach).map(|token| token.id()),
            watermark: self.stream.next_token_id(),
            reports: self.reporter.recorded()[reports_before..].to_vec(),
            leftover,
        };
        self.memo.insert(key, entry);
        self.max_seen = outer_seen.max(reach);
        node
    }

    fn replay<T: Memoized>(&mut self, start: usize, entry: MemoEntry) -> Option<Rc<T>> {
        self.stats.hits += 1;
        self.pos = start + entry.consumed;
        self.max_seen = self.max_seen.max(start + entry.lookahead - 1);
        for report in entry.reports {
            self.reporter.replay(report);
        }
        self.trivia.extend(entry.leftover);
        T::extract(&entry.node)
    }
}

#[cfg(test)]
mod tests;
