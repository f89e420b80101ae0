use pretty_assertions::assert_eq;

use ember_diagnostic::ErrorCode;
use ember_ir::TokenType;

use super::*;
use crate::tests::with_parser;

#[test]
fn test_token_set_membership() {
    let set = TokenSet::new()
        .with(TokenType::Semicolon)
        .with(TokenType::Unknown);
    assert!(set.contains(TokenType::Semicolon));
    assert!(set.contains(TokenType::Unknown));
    assert!(!set.contains(TokenType::Whitespace));
    assert!(!set.is_empty());
    assert!(TokenSet::new().is_empty());
}

#[test]
fn test_token_set_union() {
    let a = TokenSet::single(TokenType::On);
    let b = TokenSet::single(TokenType::Fn);
    let both = a.union(b);
    assert!(both.contains(TokenType::On));
    assert!(both.contains(TokenType::Fn));
    assert_eq!(both, a.with(TokenType::Fn));
}

#[test]
fn test_recovery_sets() {
    for kind in [TokenType::On, TokenType::Fn, TokenType::Let, TokenType::Type] {
        assert!(DEFINITION_RECOVERY.contains(kind));
    }
    assert!(!DEFINITION_RECOVERY.contains(TokenType::RBrace));
    assert!(STATEMENT_RECOVERY.contains(TokenType::RBrace));
    assert!(STATEMENT_RECOVERY.contains(TokenType::Return));
    assert!(!STATEMENT_RECOVERY.contains(TokenType::Identifier));
}

#[test]
fn test_synchronize_stops_before_member() {
    with_parser("a + b ; c", |p| {
        assert!(p.synchronize(TokenSet::single(TokenType::Semicolon)));
        assert!(p.check(TokenType::Semicolon));
        assert_eq!(p.reporter.len(), 0);
    });
}

#[test]
fn test_synchronize_runs_to_end() {
    with_parser("a + b", |p| {
        assert!(!p.synchronize(TokenSet::single(TokenType::Semicolon)));
        assert!(p.peek().is_none());
    });
}

#[test]
fn test_recover_reports_and_eats_semicolon() {
    with_parser(") x ; let", |p| {
        p.recover(STATEMENT_RECOVERY, ErrorCode::E1001);
        assert!(p.check(TokenType::Let));
        let reports = p.reporter.recorded();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].code, ErrorCode::E1001);
        assert_eq!(reports[0].args, vec![")".to_string()]);
        assert_eq!(reports[0].location().span.start, 0);
    });
}

#[test]
fn test_recover_always_makes_progress() {
    with_parser("; ;", |p| {
        p.recover(STATEMENT_RECOVERY, ErrorCode::E1001);
        // the offending `;` is skipped, the next one closes it
        assert!(p.peek().is_none());
    });
}
