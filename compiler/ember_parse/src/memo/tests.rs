#![allow(clippy::unwrap_used, reason = "tests edit within bounds")]

use ember_lexer::TokenStream;
use pretty_assertions::assert_eq;

use super::*;

fn stream(text: &str) -> TokenStream {
    let mut stream = TokenStream::new(text);
    stream.read_all();
    stream
}

fn entry(stream: &TokenStream, rule: Rule, lookahead: usize, reach: usize) -> MemoEntry {
    MemoEntry {
        rule,
        flags: ParseFlags::empty(),
        node: MemoNode::NoMatch,
        consumed: 0,
        lookahead,
        boundary: stream.tokens().get(reach).map(|t| t.id()),
        watermark: stream.next_token_id(),
        reports: Vec::new(),
        leftover: Trivia::new(),
    }
}

fn lookup(stream: &TokenStream) -> impl FnMut(usize) -> Option<Rc<Token>> + '_ {
    |index| stream.tokens().get(index).cloned()
}

#[test]
fn entry_is_valid_on_unchanged_stream() {
    let s = stream("a b c");
    // Rule at `a` that looked as far as `b`.
    let e = entry(&s, Rule::Expression, 3, 2);
    assert!(e.is_valid_at(0, lookup(&s)));
}

#[test]
fn entry_reaching_end_of_input() {
    let s = stream("a b");
    let e = entry(&s, Rule::Expression, 4, 3);
    assert_eq!(e.boundary, None);
    assert!(e.is_valid_at(0, lookup(&s)));
}

#[test]
fn new_token_in_range_invalidates() {
    let mut s = stream("a b c");
    let e = entry(&s, Rule::Expression, 3, 2);
    s.edit(1, 0, " ").unwrap();
    // `a` was re-scanned; the whitespace after it is new.
    assert!(!e.is_valid_at(0, lookup(&s)));
}

#[test]
fn edit_past_the_boundary_keeps_entry() {
    let mut s = stream("a b c d");
    let e = entry(&s, Rule::Expression, 3, 2);
    s.edit(6, 1, "dd").unwrap();
    assert!(e.is_valid_at(0, lookup(&s)));
}

#[test]
fn removed_tokens_move_the_boundary() {
    let mut s = stream("a b c");
    // Rule at `a` that looked as far as `c`.
    let e = entry(&s, Rule::Expression, 5, 4);
    // Drop ` b` without creating anything: `a c`.
    s.mutate(1, 2, "");
    assert!(!e.is_valid_at(0, lookup(&s)));
}

#[test]
fn appended_tokens_invalidate_end_of_input_entries() {
    let mut s = stream("a");
    let e = entry(&s, Rule::Expression, 2, 1);
    s.mutate(1, 0, " b");
    assert!(!e.is_valid_at(0, lookup(&s)));
}

#[test]
fn table_replaces_same_rule_and_flags() {
    let s = stream("a");
    let key = s.tokens()[0].id();
    let mut table = MemoTable::new();

    table.insert(key, entry(&s, Rule::Expression, 1, 0));
    table.insert(key, entry(&s, Rule::Expression, 2, 1));
    table.insert(key, entry(&s, Rule::Statement, 1, 0));
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.get(key, Rule::Expression, ParseFlags::empty()).map(|e| e.lookahead),
        Some(2)
    );
    assert!(table.get(key, Rule::Expression, ParseFlags::IN_LOOP).is_none());
    assert!(table.get(key, Rule::Block, ParseFlags::empty()).is_none());
}

#[test]
fn evict_and_forget() {
    let s = stream("a b");
    let mut table = MemoTable::new();
    for token in s.tokens() {
        table.insert(token.id(), entry(&s, Rule::Expression, 1, 0));
        table.insert(token.id(), entry(&s, Rule::Type, 1, 0));
    }
    assert_eq!(table.len(), 6);

    assert_eq!(table.evict(s.tokens()[0].id()), 2);
    assert_eq!(table.evict(s.tokens()[0].id()), 0);
    assert_eq!(table.forget(&s.tokens()[1..]), 4);
    assert!(table.is_empty());
}

#[test]
fn memoized_nodes_round_trip_through_the_enum() {
    let expr = Rc::new(Expr::missing());
    let node = Expr::wrap(Rc::clone(&expr));
    assert!(Expr::extract(&node).is_some_and(|e| Rc::ptr_eq(&e, &expr)));
    assert!(TypeExpr::extract(&node).is_none());
    assert_eq!(<Block as Memoized>::RULE, Rule::Block);
}
