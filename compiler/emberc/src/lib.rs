//! Ember front end driver.
//!
//! A [`Document`] owns the text of one source file together with its token
//! stream and parser memo. Edits are applied in place; the next
//! [`Document::parse`] re-lexes only the edited region and re-parses only
//! the rules whose tokens changed.
//!
//! ```text
//! edit_source ──► TokenStream::edit ──► MemoTable::forget
//!                                            │
//! parse ◄────────────────────────────────────┘
//!   │
//!   ├──► Rc<Program>
//!   └──► diagnostics (lexical + syntactic, sorted, limited)
//! ```

mod config;
mod document;

use std::sync::Once;

pub use config::DocumentConfig;
pub use document::{Document, LoadError};

pub use ember_diagnostic::{Diagnostic, ErrorCode, Severity};
pub use ember_ir::ast::{NodeRef, Program};
pub use ember_ir::Position;
pub use ember_lexer::EditError;
pub use ember_parse::MemoStats;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=ember_parse=trace` or `RUST_LOG=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
