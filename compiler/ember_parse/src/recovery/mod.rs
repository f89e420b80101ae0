//! Error recovery.
//!
//! Recovery sets are bitsets over token type discriminants, so membership is
//! a single AND. After a syntax error the parser skips tokens until one in
//! the active set comes up.

use ember_diagnostic::ErrorCode;
use ember_ir::TokenType;
use tracing::trace;

use crate::Parser;

const _: () = assert!(
    TokenType::MAX_DISCRIMINANT <= 127,
    "TokenSet uses a u128 bitset; every discriminant must be < 128"
);

/// A set of token types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        TokenSet(0)
    }

    #[inline]
    pub const fn single(kind: TokenType) -> Self {
        TokenSet(1u128 << kind.discriminant())
    }

    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenType) -> Self {
        TokenSet(self.0 | (1u128 << kind.discriminant()))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        TokenSet(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, kind: TokenType) -> bool {
        self.0 & (1u128 << kind.discriminant()) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Where a broken top-level definition ends.
pub const DEFINITION_RECOVERY: TokenSet = TokenSet::new()
    .with(TokenType::On)
    .with(TokenType::Fn)
    .with(TokenType::Let)
    .with(TokenType::Type)
    .with(TokenType::Semicolon);

/// Where a broken statement ends.
pub const STATEMENT_RECOVERY: TokenSet = TokenSet::new()
    .with(TokenType::Let)
    .with(TokenType::If)
    .with(TokenType::While)
    .with(TokenType::Return)
    .with(TokenType::Break)
    .with(TokenType::Continue)
    .with(TokenType::LBrace)
    .with(TokenType::RBrace)
    .with(TokenType::Semicolon);

impl Parser<'_> {
    /// Skip tokens until the next one is in `set` or input ends.
    ///
    /// Returns `true` if a token in the set was found.
    pub(crate) fn synchronize(&mut self, set: TokenSet) -> bool {
        while let Some(kind) = self.peek_kind() {
            if set.contains(kind) {
                return true;
            }
            self.advance();
        }
        false
    }

    /// Report the token at the cursor with `code`, skip it and then
    /// everything up to the recovery set. A `;` that closes the broken
    /// construct is skipped with it.
    pub(crate) fn recover(&mut self, set: TokenSet, code: ErrorCode) {
        let Some(token) = self.advance() else {
            return;
        };
        trace!(token = token.content(), "recovering after unexpected token");
        self.report_token(&token, code, &[token.content()]);
        if self.synchronize(set) && self.check(TokenType::Semicolon) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests;
