//! Lexer for the Ember front end.
//!
//! - [`Scanner`]: stateless first-byte dispatch scanner over a `&str`
//! - [`TokenStream`]: lazily read, editable token sequence with
//!   re-playable lexical diagnostics

mod scanner;
mod stream;

pub use scanner::{class_of, CharClass, RawToken, Scanner};
pub use stream::{EditError, MutationResult, TokenStream};
