use std::cell::Cell;

use pretty_assertions::assert_eq;

use ember_ir::{Location, Position, Span};

use super::*;
use crate::{DiagnosticBag, Discard};

fn fixed(offset: u32) -> RangeGetter {
    Rc::new(move || Location::point(offset, Position::new(1, offset)))
}

#[test]
fn report_records_and_forwards() {
    let mut reporter = TrackingReporter::new(DiagnosticBag::new());
    reporter.focus(fixed(4));
    reporter.report(ErrorCode::E0002, &["$"]);

    assert_eq!(reporter.len(), 1);
    assert_eq!(reporter.sink().len(), 1);
    let diag = &reporter.sink().diagnostics()[0];
    assert_eq!(diag.location.span, Span::point(4));
    assert_eq!(diag.message, "invalid character `$`");
}

#[test]
fn muted_reports_are_recorded_only() {
    let mut reporter = TrackingReporter::new(DiagnosticBag::new());
    reporter.set_muted(true);
    reporter.report::<&str>(ErrorCode::E0001, &[]);
    assert_eq!(reporter.len(), 1);
    assert!(reporter.sink().is_empty());

    reporter.set_muted(false);
    let taken = reporter.take();
    assert!(reporter.is_empty());
    for report in taken {
        reporter.replay(report);
    }
    assert_eq!(reporter.len(), 1);
    assert_eq!(reporter.sink().len(), 1);
}

#[test]
fn getters_resolve_lazily() {
    let offset = Rc::new(Cell::new(2));
    let shared = Rc::clone(&offset);
    let getter: RangeGetter = Rc::new(move || {
        let at = shared.get();
        Location::point(at, Position::new(1, at))
    });

    let mut reporter = TrackingReporter::new(Discard);
    reporter.report_at(getter, ErrorCode::E1006, &[] as &[&str]);
    assert_eq!(reporter.recorded()[0].location().span.start, 2);

    offset.set(10);
    assert_eq!(reporter.recorded()[0].to_diagnostic().start(), 10);
}

#[test]
fn report_without_focus_points_at_start() {
    let mut reporter: TrackingReporter<DiagnosticBag> = TrackingReporter::default();
    reporter.report::<&str>(ErrorCode::E1005, &[]);
    assert_eq!(reporter.recorded()[0].location(), Location::default());
}

#[test]
fn truncate_and_clear() {
    let mut reporter = TrackingReporter::new(Discard);
    reporter.focus(fixed(0));
    for _ in 0..3 {
        reporter.report::<&str>(ErrorCode::E1006, &[]);
    }
    reporter.truncate(1);
    assert_eq!(reporter.len(), 1);
    reporter.clear();
    assert!(reporter.is_empty());
}
