//! Rendered diagnostics.

use std::fmt;

use ember_ir::Location;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic with its message rendered and its location resolved.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new<S: AsRef<str>>(code: ErrorCode, args: &[S], location: Location) -> Self {
        Diagnostic {
            code,
            severity: code.severity(),
            location,
            message: code.render(args),
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Byte offset used for ordering.
    #[inline]
    pub fn start(&self) -> u32 {
        self.location.span.start
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} at {}",
            self.severity, self.code, self.message, self.location.range.start
        )
    }
}

/// Configuration for the merged diagnostic list.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of diagnostics kept (0 = unlimited).
    pub error_limit: usize,
    /// Keep warnings in the output.
    pub include_warnings: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 100,
            include_warnings: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            include_warnings: true,
        }
    }

    /// Order by start offset, drop filtered severities and apply the limit.
    ///
    /// The sort is stable, so diagnostics that share an offset keep the
    /// order they were pushed in.
    pub fn finish(&self, diagnostics: &mut Vec<Diagnostic>) {
        if !self.include_warnings {
            diagnostics.retain(Diagnostic::is_error);
        }
        diagnostics.sort_by_key(Diagnostic::start);
        if self.error_limit > 0 {
            diagnostics.truncate(self.error_limit);
        }
    }
}
