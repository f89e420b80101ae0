//! Diagnostics for the Ember front end.
//!
//! Every lexical and syntactic problem is reported as data; nothing here
//! aborts a pass. Reports are recorded by a [`TrackingReporter`] together
//! with a getter for their location, so they can be replayed after an
//! incremental edit instead of being recomputed.

mod diagnostic;
mod error_code;
mod sink;
mod tracking;

pub use diagnostic::{Diagnostic, DiagnosticConfig, Severity};
pub use error_code::ErrorCode;
pub use sink::{DiagnosticBag, DiagnosticSink, Discard};
pub use tracking::{RangeGetter, TrackedReport, TrackingReporter};
