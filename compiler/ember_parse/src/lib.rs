//! Memoizing recursive descent parser for Ember.
//!
//! A [`Parser`] makes one pass over a [`TokenStream`], reading tokens on
//! demand, and builds a [`Program`]. Rule results are stored in a
//! [`MemoTable`] that the caller keeps between passes. After an edit the
//! stream keeps unaffected tokens by reference, so a new pass re-parses
//! logically from the root but answers every rule whose tokens did not
//! change straight from the memo and links the old subtree into the new
//! tree.
//!
//! Syntax errors never abort the pass: they are reported, a placeholder
//! node stands in for what is missing, and parsing continues.

mod cursor;
mod flags;
mod grammar;
mod memo;
mod recovery;
mod series;

use std::rc::Rc;

use ember_diagnostic::{Discard, ErrorCode, TrackedReport, TrackingReporter};
use ember_ir::ast::{Program, Trivia};
use ember_lexer::TokenStream;
use tracing::debug;

use cursor::Frame;

pub use flags::ParseFlags;
pub use memo::{MemoEntry, MemoNode, MemoStats, MemoTable, Rule};
pub use recovery::{TokenSet, DEFINITION_RECOVERY, STATEMENT_RECOVERY};
pub use series::{OnFailure, Series, SeriesConfig, SeriesStop, TrailingSeparator};

/// Result of one parse pass.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Rc<Program>,
    /// Syntax diagnostics in the order they were reported.
    pub reports: Vec<TrackedReport>,
    pub stats: MemoStats,
}

/// One parse pass.
pub struct Parser<'a> {
    stream: &'a mut TokenStream,
    memo: &'a mut MemoTable,
    /// Raw token index of the cursor.
    pos: usize,
    frames: Vec<Frame>,
    /// Comments collected since the innermost frame started.
    trivia: Trivia,
    flags: Vec<ParseFlags>,
    /// Furthest raw index examined by the innermost memoized rule.
    max_seen: usize,
    reporter: TrackingReporter<Discard>,
    stats: MemoStats,
}

impl<'a> Parser<'a> {
    pub fn new(stream: &'a mut TokenStream, memo: &'a mut MemoTable) -> Self {
        Parser {
            stream,
            memo,
            pos: 0,
            frames: Vec::new(),
            trivia: Trivia::new(),
            flags: Vec::new(),
            max_seen: 0,
            reporter: TrackingReporter::new(Discard),
            stats: MemoStats::default(),
        }
    }

    /// Parse the whole stream.
    ///
    /// Comments before the first definition and comments left over at the
    /// end of input belong to the program. Tokens between definitions that
    /// start none are reported as trailing input.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(mut self) -> ParseOutput {
        self.skip_trivia();
        let mut trivia = self.take_trivia();
        let first = self.peek();

        let definitions = self
            .series(
                &SeriesConfig::to_end()
                    .resync(DEFINITION_RECOVERY)
                    .stray(ErrorCode::E1007),
                |p| p.definition(),
            )
            .items;

        let tokens = first.and_then(|first| self.slice_from(&first));
        self.skip_trivia();
        trivia.extend(self.take_trivia());

        self.stats.entries = self.memo.len();
        debug!(
            definitions = definitions.len(),
            hits = self.stats.hits,
            misses = self.stats.misses,
            evicted = self.stats.evicted,
            "parse finished"
        );

        ParseOutput {
            program: Rc::new(Program {
                definitions,
                tokens,
                trivia,
            }),
            reports: self.reporter.take(),
            stats: self.stats,
        }
    }
}

/// Parse `stream`, reusing and refreshing `memo`.
pub fn parse(stream: &mut TokenStream, memo: &mut MemoTable) -> ParseOutput {
    Parser::new(stream, memo).parse_program()
}

#[cfg(test)]
mod tests;
