//! Parser tests.
//!
//! - `parser`: grammar, recovery and trivia on fresh input
//! - `incremental`: memo reuse across parses and edits


use ember_diagnostic::ErrorCode;
use ember_lexer::TokenStream;

use crate::{parse, MemoTable, ParseOutput, Parser};

pub(crate) fn parse_source(source: &str) -> ParseOutput {
    let mut stream = TokenStream::new(source);
    let mut memo = MemoTable::new();
    parse(&mut stream, &mut memo)
}

/// Run `f` on a parser over `source` that has not consumed anything.
pub(crate) fn with_parser<R>(source: &str, f: impl FnOnce(&mut Parser<'_>) -> R) -> R {
    let mut stream = TokenStream::new(source);
    let mut memo = MemoTable::new();
    let mut parser = Parser::new(&mut stream, &mut memo);
    f(&mut parser)
}

pub(crate) fn codes(output: &ParseOutput) -> Vec<ErrorCode> {
    output.reports.iter().map(|report| report.code).collect()
}
