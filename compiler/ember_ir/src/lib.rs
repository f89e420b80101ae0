//! Core data types shared by the Ember lexer, parser and tooling.
//!
//! - [`Span`], [`Position`], [`Range`], [`Location`]: source coordinates
//! - [`EditChain`], [`Mutation`]: lazily applied coordinate shifts
//! - [`Token`], [`TokenType`], [`TokenId`]: the shared token model
//! - [`ast`]: the syntax tree produced by `ember_parse`

pub mod ast;
mod edit_chain;
mod span;
mod token;

pub use edit_chain::{EditChain, Mutation, Placement};
pub use span::{Location, Position, Range, Span, SpanError};
pub use token::{Token, TokenId, TokenType};
