//! Editing a stream must leave it indistinguishable from a fresh lex of the
//! edited text: same tokens at the same coordinates and the same lexical
//! diagnostics.

#![allow(clippy::unwrap_used, reason = "edits are generated in bounds")]

use ember_lexer::TokenStream;
use proptest::prelude::*;
use proptest::sample::Index;

const FRAGMENTS: &[&str] = &[
    "let", "on", "x", "yy", " ", "  ", "\n", "\r\n", "\t", "1", "2.5", ".", "5", "e", "+", "-",
    "=", "==", "!", "<", ">", "&", "|", "\"", "\\", "/", "*", "//", "/*", "*/", "(", ")", "{",
    "}", "[", "]", ",", ";", ":", "@", "é", "名",
];

fn text(max: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(FRAGMENTS), 0..max)
        .prop_map(|parts| parts.concat())
}

fn floor_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn fresh(text: &str) -> TokenStream {
    let mut stream = TokenStream::new(text);
    stream.read_all();
    stream
}

/// Apply a generated edit and check the result against a fresh lex.
fn check_edit(stream: &mut TokenStream, at: Index, len: Index, insert: &str) {
    let source_len = stream.source().len();
    let start = floor_boundary(stream.source(), at.index(source_len + 1));
    let end = floor_boundary(stream.source(), start + len.index(source_len - start + 1));

    let mut expected_text = stream.source().to_string();
    expected_text.replace_range(start..end, insert);

    stream.edit(start, end - start, insert).unwrap();
    let expected = fresh(&expected_text);

    assert_eq!(stream.source(), expected.source());
    assert_eq!(stream.tokens(), expected.tokens());
    assert_eq!(stream.diagnostics(), expected.diagnostics());
}

proptest! {
    #[test]
    fn single_edit_matches_fresh_lex(
        source in text(24),
        at in any::<Index>(),
        len in any::<Index>(),
        insert in text(4),
    ) {
        let mut stream = fresh(&source);
        check_edit(&mut stream, at, len, &insert);
    }

    #[test]
    fn edit_sequences_match_fresh_lex(
        source in text(24),
        edits in proptest::collection::vec((any::<Index>(), any::<Index>(), text(4)), 1..6),
    ) {
        let mut stream = fresh(&source);
        for (at, len, insert) in edits {
            check_edit(&mut stream, at, len, &insert);
        }
    }

    #[test]
    fn lazy_stream_edit_matches_fresh_lex(
        source in text(24),
        at in any::<Index>(),
        insert in text(4),
    ) {
        // Nothing read yet: the edit forces the initial read.
        let mut stream = TokenStream::new(source.as_str());
        let start = floor_boundary(&source, at.index(source.len() + 1));
        stream.edit(start, 0, &insert).unwrap();

        let mut expected_text = source.clone();
        expected_text.insert_str(start, &insert);
        let expected = fresh(&expected_text);
        prop_assert_eq!(stream.tokens(), expected.tokens());
        prop_assert_eq!(stream.diagnostics(), expected.diagnostics());
    }

    #[test]
    fn tokens_tile_the_source(source in text(32)) {
        let stream = fresh(&source);
        let mut offset = 0;
        for token in stream.tokens() {
            prop_assert_eq!(token.start() as usize, offset);
            offset = token.end() as usize;
        }
        prop_assert_eq!(offset, source.len());
    }
}
