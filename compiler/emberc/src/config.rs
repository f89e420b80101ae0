//! Document configuration.

use ember_diagnostic::DiagnosticConfig;

/// How a [`Document`](crate::Document) reports diagnostics.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DocumentConfig {
    /// Maximum number of diagnostics returned (0 = unlimited).
    pub error_limit: usize,
    pub include_warnings: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        DocumentConfig::from(DiagnosticConfig::default())
    }
}

impl DocumentConfig {
    /// Every diagnostic, warnings included.
    pub fn unlimited() -> Self {
        DocumentConfig::from(DiagnosticConfig::unlimited())
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }

    #[must_use]
    pub fn without_warnings(mut self) -> Self {
        self.include_warnings = false;
        self
    }

    pub(crate) fn diagnostics(&self) -> DiagnosticConfig {
        DiagnosticConfig {
            error_limit: self.error_limit,
            include_warnings: self.include_warnings,
        }
    }
}

impl From<DiagnosticConfig> for DocumentConfig {
    fn from(config: DiagnosticConfig) -> Self {
        DocumentConfig {
            error_limit: config.error_limit,
            include_warnings: config.include_warnings,
        }
    }
}
