use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::W1001.as_str(), "W1001");
}

#[test]
fn test_phases() {
    assert!(ErrorCode::E0004.is_lexer_error());
    assert!(!ErrorCode::E0004.is_parser_error());
    assert!(ErrorCode::E1008.is_parser_error());
    assert!(!ErrorCode::W1001.is_parser_error());
}

#[test]
fn test_only_w_codes_are_warnings() {
    for code in ErrorCode::ALL {
        let expected = if code.as_str().starts_with('W') {
            Severity::Warning
        } else {
            Severity::Error
        };
        assert_eq!(code.severity(), expected, "{code}");
    }
}

#[test]
fn test_render_fills_placeholders() {
    assert_eq!(ErrorCode::E0002.render(&["@"]), "invalid character `@`");
    assert_eq!(ErrorCode::E1002.render(&["`;`"]), "expected `;`");
    assert_eq!(
        ErrorCode::E1003.render::<&str>(&[]),
        "expected identifier"
    );
}

#[test]
fn test_render_keeps_unmatched_placeholder() {
    assert_eq!(ErrorCode::E1001.render::<&str>(&[]), "unexpected token `{0}`");
}

#[test]
fn test_render_does_not_rescan_arguments() {
    assert_eq!(ErrorCode::E0002.render(&["{0}"]), "invalid character `{0}`");
}
