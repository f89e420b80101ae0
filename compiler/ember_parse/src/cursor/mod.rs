//! Token navigation, backtracking frames and reporting.
//!
//! The cursor is a raw index into the stream, trivia included. `peek` and
//! `check` look past trivia without moving; `advance` moves past trivia and
//! one real token, collecting comments on the way.
//!
//! Speculative reads are bracketed by [`save`](Parser::save) and then
//! either [`commit`](Parser::commit) or [`rollback`](Parser::rollback).
//! Each frame owns the comments collected while it is open: committing
//! hands them to the enclosing frame, rolling back drops them together
//! with the cursor movement and every diagnostic reported since `save`.

use std::rc::Rc;

use ember_diagnostic::{ErrorCode, RangeGetter};
use ember_ir::ast::{Comment, TokenSlice, Trivia};
use ember_ir::{Location, Token, TokenType};

use crate::{ParseFlags, Parser};

/// A saved cursor position.
#[derive(Debug)]
pub(crate) struct Frame {
    pos: usize,
    reports: usize,
    /// The enclosing frame's comments, restored when this frame closes.
    parent_trivia: Trivia,
}

impl Parser<'_> {
    /// Raw token at `index`, reading the stream on demand.
    pub(crate) fn raw(&mut self, index: usize) -> Option<Rc<Token>> {
        self.stream.token(index).cloned()
    }

    #[inline]
    fn see(&mut self, index: usize) {
        self.max_seen = self.max_seen.max(index);
    }

    /// Raw index of the next real token, or the stream length at end of
    /// input.
    pub(crate) fn peek_index(&mut self) -> usize {
        let mut index = self.pos;
        while self
            .stream
            .token(index)
            .is_some_and(|token| token.is_trivia())
        {
            index += 1;
        }
        self.see(index);
        index
    }

    pub(crate) fn peek(&mut self) -> Option<Rc<Token>> {
        let index = self.peek_index();
        self.raw(index)
    }

    pub(crate) fn peek_kind(&mut self) -> Option<TokenType> {
        self.peek().map(|token| token.kind())
    }

    #[inline]
    pub(crate) fn check(&mut self, kind: TokenType) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consume one raw token. Comments go to the current trivia buffer and
    /// memo entries keyed by the token are dropped, since it is being read
    /// directly rather than through a memoized rule.
    fn bump(&mut self, token: &Rc<Token>) {
        self.see(self.pos);
        self.pos += 1;
        self.stats.evicted += self.memo.evict(token.id());
        if token.kind() == TokenType::Comment {
            self.trivia.push(Comment {
                token: Rc::clone(token),
            });
        }
    }

    /// Consume trivia and the next real token. At end of input nothing is
    /// consumed.
    pub(crate) fn advance(&mut self) -> Option<Rc<Token>> {
        let target = self.peek_index();
        let token = self.raw(target)?;
        while self.pos <= target {
            let Some(raw) = self.raw(self.pos) else {
                break;
            };
            self.bump(&raw);
        }
        Some(token)
    }

    /// Consume trivia up to the next real token.
    pub(crate) fn skip_trivia(&mut self) {
        let target = self.peek_index();
        while self.pos < target {
            let Some(raw) = self.raw(self.pos) else {
                break;
            };
            self.bump(&raw);
        }
    }

    pub(crate) fn eat(&mut self, kind: TokenType) -> Option<Rc<Token>> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Consume a `kind` token or report it as expected.
    pub(crate) fn expect(&mut self, kind: TokenType) -> Option<Rc<Token>> {
        let token = self.eat(kind);
        if token.is_none() {
            self.report_here(ErrorCode::E1002, &[format!("`{kind}`")]);
        }
        token
    }

    /// The last consumed token.
    pub(crate) fn previous(&self) -> Option<Rc<Token>> {
        let index = self.pos.checked_sub(1)?;
        self.stream.tokens().get(index).cloned()
    }

    /// Tokens from `first` through the last consumed one.
    pub(crate) fn slice_from(&self, first: &Rc<Token>) -> Option<TokenSlice> {
        self.previous()
            .map(|last| TokenSlice::new(Rc::clone(first), last))
    }

    /// Claim the comments collected in the current frame. A node calls this
    /// right after consuming its first token.
    pub(crate) fn take_trivia(&mut self) -> Trivia {
        std::mem::take(&mut self.trivia)
    }

    pub(crate) fn save(&mut self) {
        self.frames.push(Frame {
            pos: self.pos,
            reports: self.reporter.len(),
            parent_trivia: std::mem::take(&mut self.trivia),
        });
    }

    /// Keep everything since the matching `save`.
    pub(crate) fn commit(&mut self) {
        if let Some(frame) = self.frames.pop() {
            let captured = std::mem::replace(&mut self.trivia, frame.parent_trivia);
            self.trivia.extend(captured);
        }
    }

    /// Undo everything since the matching `save`.
    pub(crate) fn rollback(&mut self) {
        if let Some(frame) = self.frames.pop() {
            self.pos = frame.pos;
            self.trivia = frame.parent_trivia;
            self.reporter.truncate(frame.reports);
        }
    }

    /// Run `f` and undo whatever it consumed.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.save();
        let result = f(self);
        self.rollback();
        result
    }

    pub(crate) fn flags(&self) -> ParseFlags {
        self.flags.last().copied().unwrap_or_default()
    }

    /// Run `f` with `add` set and `remove` cleared.
    pub(crate) fn with_flags<T>(
        &mut self,
        add: ParseFlags,
        remove: ParseFlags,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let flags = self.flags().scoped(add, remove);
        self.flags.push(flags);
        let result = f(self);
        self.flags.pop();
        result
    }

    pub(crate) fn report_at<A: AsRef<str>>(
        &mut self,
        getter: RangeGetter,
        code: ErrorCode,
        args: &[A],
    ) {
        self.reporter.report_at(getter, code, args);
    }

    pub(crate) fn report_token<A: AsRef<str>>(
        &mut self,
        token: &Rc<Token>,
        code: ErrorCode,
        args: &[A],
    ) {
        let token = Rc::clone(token);
        self.report_at(Rc::new(move || token.location()), code, args);
    }

    /// Report over the tokens of a node.
    pub(crate) fn report_slice(&mut self, slice: &TokenSlice, code: ErrorCode) {
        let slice = slice.clone();
        self.report_at::<&str>(Rc::new(move || slice.location()), code, &[]);
    }

    /// Report at the next real token, or just past the last token at end of
    /// input.
    pub(crate) fn report_here<A: AsRef<str>>(&mut self, code: ErrorCode, args: &[A]) {
        if let Some(token) = self.peek() {
            self.report_token(&token, code, args);
            return;
        }
        let getter: RangeGetter = match self.stream.tokens().last() {
            Some(last) => {
                let last = Rc::clone(last);
                Rc::new(move || last.end_location())
            }
            None => Rc::new(Location::default),
        };
        self.report_at(getter, code, args);
    }

    /// Report that a required construct is missing.
    pub(crate) fn report_missing(&mut self, code: ErrorCode) {
        self.report_here::<&str>(code, &[]);
    }
}
