//! Editable token stream.
//!
//! Tokens are read lazily from the backing text. After the initial read an
//! edit is applied with [`TokenStream::mutate`]: one [`Mutation`] is pushed
//! on the shared edit chain, only the edited region is re-scanned, and
//! scanning stops as soon as a freshly scanned token matches an original
//! one. Everything after that point is kept by reference and picks up its
//! new coordinates lazily from the chain.
//!
//! Lexical diagnostics are recorded with getters that read the offending
//! token's current location, so reports outside the edited region survive
//! an edit without being recomputed.

mod edit;

use std::rc::Rc;

use ember_diagnostic::{
    Diagnostic, DiagnosticBag, ErrorCode, RangeGetter, TrackedReport, TrackingReporter,
};
use ember_ir::{EditChain, Mutation, Position, Token, TokenId};
use tracing::{debug, trace};

use crate::scanner::{RawToken, Scanner};

pub use edit::EditError;

/// Outcome of a [`TokenStream::mutate`] call.
#[derive(Debug, Default)]
pub struct MutationResult {
    /// Freshly created tokens, in order.
    pub inserted: Vec<Rc<Token>>,
    /// Tokens that left the stream: the requested range plus any original
    /// tokens superseded while re-scanning.
    /// They are detached and keep their pre-edit coordinates.
    pub removed: Vec<Rc<Token>>,
    /// Index of the first inserted token (or of the splice point).
    pub first_index: usize,
}

pub struct TokenStream {
    source: String,
    tokens: Vec<Rc<Token>>,
    chain: EditChain,
    next_id: TokenId,
    /// Where the lazy initial read continues.
    read_offset: usize,
    read_pos: Position,
    reporter: TrackingReporter<DiagnosticBag>,
}

impl TokenStream {
    pub fn new(text: impl Into<String>) -> Self {
        TokenStream {
            source: text.into(),
            tokens: Vec::new(),
            chain: EditChain::new(),
            next_id: TokenId::new(0),
            read_offset: 0,
            read_pos: Position::START,
            reporter: TrackingReporter::new(DiagnosticBag::new()),
        }
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tokens read so far.
    #[inline]
    pub fn tokens(&self) -> &[Rc<Token>] {
        &self.tokens
    }

    /// Number of tokens read so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn chain(&self) -> &EditChain {
        &self.chain
    }

    /// Id the next created token will receive. Every token currently in the
    /// stream has a smaller id.
    #[inline]
    pub fn next_token_id(&self) -> TokenId {
        self.next_id
    }

    /// True once the whole backing text has been scanned.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.read_offset >= self.source.len()
    }

    pub fn reporter(&self) -> &TrackingReporter<DiagnosticBag> {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut TrackingReporter<DiagnosticBag> {
        &mut self.reporter
    }

    /// Lexical diagnostics at their current locations, in source order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.reporter
            .recorded()
            .iter()
            .map(TrackedReport::to_diagnostic)
            .collect()
    }

    /// Token `index`, reading further into the source if needed.
    pub fn token(&mut self, index: usize) -> Option<&Rc<Token>> {
        while self.tokens.len() <= index && !self.is_complete() {
            self.read_token();
        }
        self.tokens.get(index)
    }

    /// Read one more token from the backing text. Returns `None` once the
    /// stream is complete.
    pub fn read_token(&mut self) -> Option<Rc<Token>> {
        let raw = Scanner::at(&self.source, self.read_offset).next_token()?;
        let token = self.create(self.read_offset, self.read_pos, raw);
        if let Some(code) = raw.error {
            self.report(&token, code);
        }
        self.read_offset += raw.len;
        self.read_pos = token.end_pos();
        self.tokens.push(Rc::clone(&token));
        Some(token)
    }

    /// Read everything that is left.
    pub fn read_all(&mut self) {
        while self.read_token().is_some() {}
    }

    /// Read everything that is left without forwarding diagnostics to the
    /// sink. Reports are still recorded.
    fn read_rest_muted(&mut self) {
        if self.is_complete() {
            return;
        }
        let was_muted = self.reporter.is_muted();
        self.reporter.set_muted(true);
        self.read_all();
        self.reporter.set_muted(was_muted);
    }

    fn create(&mut self, offset: usize, pos: Position, raw: RawToken) -> Rc<Token> {
        let id = self.next_id;
        self.next_id = id.next();
        let content = &self.source[offset..offset + raw.len];
        Rc::new(Token::new(
            id,
            raw.kind,
            content,
            to_u32(offset),
            pos,
            &self.chain,
        ))
    }

    fn report(&mut self, token: &Rc<Token>, code: ErrorCode) {
        let anchored = Rc::clone(token);
        let getter: RangeGetter = Rc::new(move || anchored.location());
        self.reporter.focus(getter);
        match code {
            ErrorCode::E0002 | ErrorCode::E0003 => self.reporter.report(code, &[token.content()]),
            _ => self.reporter.report::<&str>(code, &[]),
        }
    }

    /// Replace `num` tokens starting at `first` with the tokens of `insert`.
    ///
    /// The range is clamped to the stream. Scanning restarts at the first
    /// removed token and stops at the first new token equal in type, start
    /// and text to the next original token that has not been passed yet;
    /// that original token and everything after it are kept.
    pub fn mutate(&mut self, first: usize, num: usize, insert: &str) -> MutationResult {
        self.read_rest_muted();
        // The sink only holds what the latest mutation emitted.
        self.reporter.sink_mut().take();

        if self.tokens.is_empty() {
            return self.relex_everything(insert);
        }

        let len = self.tokens.len();
        let first = first.min(len);
        let num = num.min(len - first);

        let (removed_start, start_pos) = match self.tokens.get(first) {
            Some(token) => (token.start(), token.start_pos()),
            None => (to_u32(self.source.len()), self.read_pos),
        };
        let (removed_end, end_pos) = match num {
            0 => (removed_start, start_pos),
            _ => {
                let last = &self.tokens[first + num - 1];
                (last.end(), last.end_pos())
            }
        };

        // Locations of recorded reports, in the coordinates before this edit.
        let reports: Vec<(u32, TrackedReport)> = self
            .reporter
            .take()
            .into_iter()
            .map(|report| (report.location().span.start, report))
            .collect();

        let mutation = Mutation::replacing(removed_start, removed_end, start_pos, end_pos, insert);
        self.source
            .replace_range(removed_start as usize..removed_end as usize, insert);

        // Re-scan from the removal start, merging against the original tail.
        // The mutation is not on the chain yet, so original tokens still
        // report their old coordinates; every candidate starts at or after
        // the removed region and moves by exactly `byte_offset`.
        let shifted = |old: &Token| i64::from(old.start()) + mutation.byte_offset;
        let mut scanned = Vec::new();
        let mut candidate = first + num;
        let mut anchor = None;
        let mut offset = removed_start as usize;
        let mut pos = start_pos;
        let mut scanner = Scanner::at(&self.source, offset);
        while let Some(raw) = scanner.next_token() {
            let at = i64::try_from(offset).unwrap_or(i64::MAX);
            while self.tokens.get(candidate).is_some_and(|old| shifted(old) < at) {
                candidate += 1;
            }
            if let Some(old) = self.tokens.get(candidate) {
                if shifted(old) == at
                    && old.kind() == raw.kind
                    && old.content() == &self.source[offset..offset + raw.len]
                {
                    anchor = Some((candidate, old.start()));
                    break;
                }
            }
            scanned.push((offset, pos, raw));
            pos = pos.advance_over(&self.source[offset..offset + raw.len]);
            offset += raw.len;
        }

        let keep_from = anchor.map_or(len, |(index, _)| index);
        let tail: Vec<Rc<Token>> = self.tokens.drain(keep_from..).collect();
        let removed: Vec<Rc<Token>> = self.tokens.drain(first..).collect();
        // Retired tokens keep the coordinates of the last revision they
        // belonged to.
        for token in &removed {
            token.detach();
        }
        self.chain.push(mutation);

        let mut inserted = Vec::with_capacity(scanned.len());
        let mut errors = Vec::new();
        for (offset, pos, raw) in scanned {
            let token = self.create(offset, pos, raw);
            if let Some(code) = raw.error {
                errors.push((Rc::clone(&token), code));
            }
            inserted.push(token);
        }
        self.tokens.extend(inserted.iter().cloned());
        self.tokens.extend(tail);
        self.read_offset = self.source.len();
        self.read_pos = self
            .tokens
            .last()
            .map_or(Position::START, |token| token.end_pos());

        let anchor_start = anchor.map(|(_, old_start)| old_start);
        self.restore_reports(reports, removed_start, anchor_start, errors);

        debug!(
            first,
            num,
            inserted = inserted.len(),
            removed = removed.len(),
            anchored = anchor.is_some(),
            "token stream mutated"
        );

        MutationResult {
            inserted,
            removed,
            first_index: first,
        }
    }

    /// Re-record surviving reports around the ones found while re-scanning.
    ///
    /// Reports before the removal start are untouched by the edit. Reports
    /// at or after the re-anchor point follow their tokens. Everything in
    /// between belonged to tokens that were removed or superseded.
    fn restore_reports(
        &mut self,
        reports: Vec<(u32, TrackedReport)>,
        removed_start: u32,
        anchor_start: Option<u32>,
        errors: Vec<(Rc<Token>, ErrorCode)>,
    ) {
        let was_muted = self.reporter.is_muted();
        let mut after = Vec::new();
        self.reporter.set_muted(true);
        for (start, report) in reports {
            if start < removed_start {
                self.reporter.replay(report);
            } else if anchor_start.is_some_and(|anchor| start >= anchor) {
                after.push(report);
            } else {
                trace!(code = %report.code, start, "dropping lexical report in edited region");
            }
        }
        self.reporter.set_muted(was_muted);

        for (token, code) in errors {
            self.report(&token, code);
        }

        self.reporter.set_muted(true);
        for report in after {
            self.reporter.replay(report);
        }
        self.reporter.set_muted(was_muted);
    }

    fn relex_everything(&mut self, text: &str) -> MutationResult {
        self.source = text.to_string();
        self.read_offset = 0;
        self.read_pos = Position::START;
        self.reporter.clear();
        self.read_all();
        MutationResult {
            inserted: self.tokens.clone(),
            removed: Vec::new(),
            first_index: 0,
        }
    }
}

impl std::fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStream")
            .field("len", &self.tokens.len())
            .field("complete", &self.is_complete())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

#[inline]
fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
