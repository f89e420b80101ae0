//! Repetition combinator for delimited and terminated lists.
//!
//! One loop drives parameter lists, arguments, array and object literals,
//! record types, block statements and the top-level definitions. The
//! terminator is checked before each item but never consumed, so the
//! caller `expect`s it and reports it when missing.

use ember_diagnostic::ErrorCode;
use ember_ir::TokenType;

use crate::recovery::TokenSet;
use crate::Parser;

/// Whether a delimiter may directly precede the terminator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrailingSeparator {
    Allowed,
    /// A trailing delimiter is reported as unexpected.
    Forbidden,
}

/// What happens when an item does not match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OnFailure {
    /// Stop the series.
    Abort,
    /// Report the token, skip to the set and keep going.
    Resync(TokenSet),
}

#[derive(Copy, Clone, Debug)]
pub struct SeriesConfig {
    pub delimiter: Option<TokenType>,
    pub terminator: Option<TokenType>,
    pub trailing: TrailingSeparator,
    pub on_failure: OnFailure,
    /// Reported for the token skipped when resyncing.
    pub stray: ErrorCode,
}

impl SeriesConfig {
    /// Comma separated items closed by `terminator`.
    pub const fn comma(terminator: TokenType) -> Self {
        SeriesConfig {
            delimiter: Some(TokenType::Comma),
            terminator: Some(terminator),
            trailing: TrailingSeparator::Allowed,
            on_failure: OnFailure::Abort,
            stray: ErrorCode::E1001,
        }
    }

    /// Undelimited items closed by `terminator`.
    pub const fn until(terminator: TokenType) -> Self {
        SeriesConfig {
            delimiter: None,
            terminator: Some(terminator),
            trailing: TrailingSeparator::Allowed,
            on_failure: OnFailure::Abort,
            stray: ErrorCode::E1001,
        }
    }

    /// Undelimited items up to end of input.
    pub const fn to_end() -> Self {
        SeriesConfig {
            delimiter: None,
            terminator: None,
            trailing: TrailingSeparator::Allowed,
            on_failure: OnFailure::Abort,
            stray: ErrorCode::E1001,
        }
    }

    #[must_use]
    pub const fn trailing(mut self, trailing: TrailingSeparator) -> Self {
        self.trailing = trailing;
        self
    }

    #[must_use]
    pub const fn resync(mut self, set: TokenSet) -> Self {
        self.on_failure = OnFailure::Resync(set);
        self
    }

    #[must_use]
    pub const fn stray(mut self, code: ErrorCode) -> Self {
        self.stray = code;
        self
    }

    fn recovery_set(&self) -> Option<TokenSet> {
        match self.on_failure {
            OnFailure::Abort => None,
            OnFailure::Resync(set) => Some(match self.terminator {
                Some(terminator) => set.with(terminator),
                None => set,
            }),
        }
    }
}

/// Why a series ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeriesStop {
    /// The next token is the terminator.
    Terminator,
    EndOfInput,
    /// An item failed under [`OnFailure::Abort`], or an item was followed
    /// by neither the delimiter nor the terminator.
    Aborted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Series<T> {
    pub items: Vec<T>,
    pub stop: SeriesStop,
}

impl Parser<'_> {
    /// Parse items until the terminator or end of input.
    ///
    /// `item` returns `None` when nothing it recognizes starts at the
    /// cursor.
    pub(crate) fn series<T>(
        &mut self,
        config: &SeriesConfig,
        mut item: impl FnMut(&mut Self) -> Option<T>,
    ) -> Series<T> {
        let mut items = Vec::new();
        let stop = loop {
            match self.peek_kind() {
                None => break SeriesStop::EndOfInput,
                Some(kind) if Some(kind) == config.terminator => break SeriesStop::Terminator,
                Some(_) => {}
            }

            let before = self.pos;
            match item(self) {
                Some(value) => items.push(value),
                None => match config.recovery_set() {
                    None => break SeriesStop::Aborted,
                    Some(set) => {
                        self.recover(set, config.stray);
                        continue;
                    }
                },
            }

            let Some(delimiter) = config.delimiter else {
                if self.pos == before {
                    // A matched item that consumed nothing cannot repeat.
                    break SeriesStop::Aborted;
                }
                continue;
            };
            if let Some(token) = self.eat(delimiter) {
                if config.trailing == TrailingSeparator::Forbidden
                    && config.terminator.is_some_and(|t| self.check(t))
                {
                    self.report_token(&token, ErrorCode::E1001, &[token.content()]);
                }
                continue;
            }
            match self.peek_kind() {
                None => break SeriesStop::EndOfInput,
                Some(kind) if Some(kind) == config.terminator => break SeriesStop::Terminator,
                Some(_) => break SeriesStop::Aborted,
            }
        };
        Series { items, stop }
    }
}

#[cfg(test)]
mod tests;
