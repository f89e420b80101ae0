//! Reporter that keeps every report re-playable.
//!
//! A report does not store a fixed location. It stores a [`RangeGetter`],
//! a closure that resolves the location when asked. Getters built from
//! tokens follow the edit chain, so a report made before an edit still
//! points at the right text afterwards and can be replayed as-is.

use std::fmt;
use std::rc::Rc;

use ember_ir::Location;

use crate::{Diagnostic, DiagnosticSink, ErrorCode};

/// Lazily resolved location of a report.
pub type RangeGetter = Rc<dyn Fn() -> Location>;

/// A recorded report.
#[derive(Clone)]
pub struct TrackedReport {
    pub code: ErrorCode,
    pub args: Vec<String>,
    getter: RangeGetter,
}

impl TrackedReport {
    pub fn new(code: ErrorCode, args: Vec<String>, getter: RangeGetter) -> Self {
        TrackedReport { code, args, getter }
    }

    /// Current location of the reported text.
    pub fn location(&self) -> Location {
        (self.getter)()
    }

    pub fn getter(&self) -> &RangeGetter {
        &self.getter
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.code, &self.args, self.location())
    }
}

impl fmt::Debug for TrackedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedReport")
            .field("code", &self.code)
            .field("args", &self.args)
            .field("location", &self.location())
            .finish()
    }
}

/// Records reports with their getters and forwards rendered diagnostics to
/// a sink.
pub struct TrackingReporter<S: DiagnosticSink> {
    sink: S,
    focus: Option<RangeGetter>,
    recorded: Vec<TrackedReport>,
    muted: bool,
}

impl<S: DiagnosticSink> TrackingReporter<S> {
    pub fn new(sink: S) -> Self {
        TrackingReporter {
            sink,
            focus: None,
            recorded: Vec::new(),
            muted: false,
        }
    }

    /// Set the location getter used by subsequent [`report`](Self::report)
    /// calls.
    pub fn focus(&mut self, getter: RangeGetter) {
        self.focus = Some(getter);
    }

    /// Report at the current focus. Without a focus the report points at
    /// the start of the document.
    pub fn report<A: AsRef<str>>(&mut self, code: ErrorCode, args: &[A]) {
        let getter: RangeGetter = match &self.focus {
            Some(getter) => Rc::clone(getter),
            None => Rc::new(Location::default),
        };
        self.report_at(getter, code, args);
    }

    /// Report at an explicit getter without changing the focus.
    pub fn report_at<A: AsRef<str>>(&mut self, getter: RangeGetter, code: ErrorCode, args: &[A]) {
        let args = args.iter().map(|a| a.as_ref().to_string()).collect();
        self.replay(TrackedReport::new(code, args, getter));
    }

    /// Record an existing report again and forward it.
    pub fn replay(&mut self, report: TrackedReport) {
        if !self.muted {
            self.sink.emit(report.to_diagnostic());
        }
        self.recorded.push(report);
    }

    pub fn recorded(&self) -> &[TrackedReport] {
        &self.recorded
    }

    pub fn len(&self) -> usize {
        self.recorded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }

    /// Drop every report recorded after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.recorded.truncate(len);
    }

    pub fn take(&mut self) -> Vec<TrackedReport> {
        std::mem::take(&mut self.recorded)
    }

    pub fn clear(&mut self) {
        self.recorded.clear();
        self.focus = None;
    }

    /// While muted, reports are recorded but not forwarded.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: DiagnosticSink + Default> Default for TrackingReporter<S> {
    fn default() -> Self {
        TrackingReporter::new(S::default())
    }
}

impl<S: DiagnosticSink> fmt::Debug for TrackingReporter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingReporter")
            .field("recorded", &self.recorded)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
