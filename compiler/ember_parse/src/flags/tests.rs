use super::*;

#[test]
fn default_allows_everything_structural() {
    let flags = ParseFlags::default();
    assert!(flags.allows_object_literal());
    assert!(!flags.in_loop());
    assert!(!flags.in_function());
}

#[test]
fn scoped_adds_and_removes() {
    let cond = ParseFlags::IN_FUNCTION.scoped(ParseFlags::NO_OBJECT_LITERAL, ParseFlags::empty());
    assert!(!cond.allows_object_literal());
    assert!(cond.in_function());

    let paren = cond.scoped(ParseFlags::empty(), ParseFlags::NO_OBJECT_LITERAL);
    assert!(paren.allows_object_literal());
    assert!(paren.in_function());
}

#[test]
fn removing_wins_over_adding_the_same_flag() {
    let flags = ParseFlags::empty().scoped(ParseFlags::IN_LOOP, ParseFlags::IN_LOOP);
    assert!(!flags.in_loop());
}
