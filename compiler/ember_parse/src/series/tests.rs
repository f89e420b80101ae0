use pretty_assertions::assert_eq;

use ember_diagnostic::ErrorCode;
use ember_ir::TokenType;

use super::*;
use crate::tests::with_parser;

fn names(p: &mut Parser<'_>) -> Option<String> {
    p.identifier().map(|ident| ident.name)
}

fn codes(p: &Parser<'_>) -> Vec<ErrorCode> {
    p.reporter.recorded().iter().map(|r| r.code).collect()
}

#[test]
fn test_comma_config() {
    let config = SeriesConfig::comma(TokenType::RParen);
    assert_eq!(config.delimiter, Some(TokenType::Comma));
    assert_eq!(config.terminator, Some(TokenType::RParen));
    assert_eq!(config.trailing, TrailingSeparator::Allowed);
    assert_eq!(config.on_failure, OnFailure::Abort);
    assert_eq!(config.stray, ErrorCode::E1001);
}

#[test]
fn test_builders() {
    let set = TokenSet::single(TokenType::Semicolon);
    let config = SeriesConfig::until(TokenType::RBrace)
        .trailing(TrailingSeparator::Forbidden)
        .resync(set)
        .stray(ErrorCode::E1007);
    assert_eq!(config.delimiter, None);
    assert_eq!(config.trailing, TrailingSeparator::Forbidden);
    assert_eq!(config.on_failure, OnFailure::Resync(set));
    assert_eq!(config.stray, ErrorCode::E1007);
}

#[test]
fn test_recovery_set_includes_terminator() {
    let config = SeriesConfig::until(TokenType::RBrace).resync(TokenSet::new());
    let set = config.recovery_set().unwrap_or_default();
    assert!(set.contains(TokenType::RBrace));
    assert!(!set.contains(TokenType::Semicolon));
    assert!(SeriesConfig::to_end().recovery_set().is_none());
}

#[test]
fn test_stops_at_terminator() {
    with_parser("a, b, c) d", |p| {
        let series = p.series(&SeriesConfig::comma(TokenType::RParen), names);
        assert_eq!(series.items, vec!["a", "b", "c"]);
        assert_eq!(series.stop, SeriesStop::Terminator);
        // the terminator is left for the caller
        assert!(p.check(TokenType::RParen));
        assert!(codes(p).is_empty());
    });
}

#[test]
fn test_empty_series() {
    with_parser(")", |p| {
        let series = p.series(&SeriesConfig::comma(TokenType::RParen), names);
        assert!(series.items.is_empty());
        assert_eq!(series.stop, SeriesStop::Terminator);
    });
}

#[test]
fn test_trailing_separator_allowed() {
    with_parser("a, b,)", |p| {
        let series = p.series(&SeriesConfig::comma(TokenType::RParen), names);
        assert_eq!(series.items, vec!["a", "b"]);
        assert_eq!(series.stop, SeriesStop::Terminator);
        assert!(codes(p).is_empty());
    });
}

#[test]
fn test_trailing_separator_forbidden() {
    with_parser("a, b,)", |p| {
        let config =
            SeriesConfig::comma(TokenType::RParen).trailing(TrailingSeparator::Forbidden);
        let series = p.series(&config, names);
        assert_eq!(series.items, vec!["a", "b"]);
        assert_eq!(series.stop, SeriesStop::Terminator);
        assert_eq!(codes(p), vec![ErrorCode::E1001]);
        assert_eq!(p.reporter.recorded()[0].args, vec![",".to_string()]);
    });
}

#[test]
fn test_failed_item_aborts() {
    with_parser("a, 1)", |p| {
        let series = p.series(&SeriesConfig::comma(TokenType::RParen), names);
        assert_eq!(series.items, vec!["a"]);
        assert_eq!(series.stop, SeriesStop::Aborted);
        assert!(p.check(TokenType::Integer));
        assert!(codes(p).is_empty());
    });
}

#[test]
fn test_missing_delimiter_aborts() {
    with_parser("a b)", |p| {
        let series = p.series(&SeriesConfig::comma(TokenType::RParen), names);
        assert_eq!(series.items, vec!["a"]);
        assert_eq!(series.stop, SeriesStop::Aborted);
    });
}

#[test]
fn test_end_of_input() {
    with_parser("a, b", |p| {
        let series = p.series(&SeriesConfig::comma(TokenType::RParen), names);
        assert_eq!(series.items, vec!["a", "b"]);
        assert_eq!(series.stop, SeriesStop::EndOfInput);
    });
}

#[test]
fn test_resync_skips_to_set() {
    with_parser("a 1 2; b", |p| {
        let config = SeriesConfig::to_end().resync(TokenSet::single(TokenType::Semicolon));
        let series = p.series(&config, names);
        assert_eq!(series.items, vec!["a", "b"]);
        assert_eq!(series.stop, SeriesStop::EndOfInput);
        assert_eq!(codes(p), vec![ErrorCode::E1001]);
        assert_eq!(p.reporter.recorded()[0].args, vec!["1".to_string()]);
    });
}

#[test]
fn test_resync_reports_stray_code() {
    with_parser("a ) b", |p| {
        let config = SeriesConfig::to_end()
            .resync(TokenSet::single(TokenType::Identifier))
            .stray(ErrorCode::E1007);
        let series = p.series(&config, names);
        assert_eq!(series.items, vec!["a", "b"]);
        assert_eq!(codes(p), vec![ErrorCode::E1007]);
    });
}

#[test]
fn test_resync_stops_before_terminator() {
    with_parser("a ) ) }", |p| {
        let config = SeriesConfig::until(TokenType::RBrace).resync(TokenSet::new());
        let series = p.series(&config, names);
        assert_eq!(series.items, vec!["a"]);
        assert_eq!(series.stop, SeriesStop::Terminator);
        // only the first stray token is reported, the rest is skipped
        assert_eq!(codes(p), vec![ErrorCode::E1001]);
    });
}
