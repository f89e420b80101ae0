use std::fmt;

use crate::Severity;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - W1xxx: Parser warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Malformed numeric literal
    E0003,
    /// Unterminated block comment
    E0004,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected a specific token
    E1002,
    /// Expected identifier
    E1003,
    /// Expected type
    E1004,
    /// Expected block
    E1005,
    /// Expected expression
    E1006,
    /// Trailing input after a complete construct
    E1007,
    /// Assignment to a non-assignable expression
    E1008,

    // Parser Warnings (W1xxx)
    /// `&&` and `||` mixed without parentheses
    W1001,
}

impl ErrorCode {
    /// Every registered code, in numeric order.
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::W1001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::W1001 => "W1001",
        }
    }

    /// Message template. `{0}`, `{1}`, ... are replaced by report arguments.
    pub fn template(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character `{0}`",
            ErrorCode::E0003 => "malformed numeric literal `{0}`",
            ErrorCode::E0004 => "unterminated block comment",
            ErrorCode::E1001 => "unexpected token `{0}`",
            ErrorCode::E1002 => "expected {0}",
            ErrorCode::E1003 => "expected identifier",
            ErrorCode::E1004 => "expected type",
            ErrorCode::E1005 => "expected block",
            ErrorCode::E1006 => "expected expression",
            ErrorCode::E1007 => "unexpected trailing input `{0}`",
            ErrorCode::E1008 => "cannot assign to this expression",
            ErrorCode::W1001 => "`&&` and `||` mixed without parentheses",
        }
    }

    pub fn severity(&self) -> Severity {
        if self.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W1001)
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Fill the template with `args`.
    ///
    /// Placeholders without a matching argument are left as written.
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> String {
        let template = self.template();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let arg = after.find('}').and_then(|close| {
                let index: usize = after[..close].parse().ok()?;
                Some((close, args.get(index)?))
            });
            match arg {
                Some((close, value)) => {
                    out.push_str(value.as_ref());
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
