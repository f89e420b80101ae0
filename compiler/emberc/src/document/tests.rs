#![allow(clippy::unwrap_used, reason = "tests edit within bounds")]

use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn loaded(source: &str) -> Document {
    let mut doc = Document::new(DocumentConfig::unlimited());
    doc.load_source(source).unwrap();
    doc
}

#[test]
fn test_size_check() {
    let max = usize::try_from(u32::MAX).unwrap();
    assert_eq!(check_size(0), Ok(()));
    assert_eq!(check_size(max), Ok(()));
    let too_large = max + 1;
    assert_eq!(check_size(too_large), Err(LoadError::TooLarge(too_large)));
    assert!(LoadError::TooLarge(too_large)
        .to_string()
        .contains("4294967296 bytes"));
}

#[test]
fn test_new_document_is_empty() {
    let mut doc = Document::default();
    assert_eq!(doc.source(), "");
    assert!(doc.parse().definitions.is_empty());
    assert!(doc.diagnostics().is_empty());
    assert!(doc.tokens().is_empty());
}

#[test]
fn test_parse_is_cached_until_edit() {
    let mut doc = loaded("on f() { x; }");
    let first = doc.parse();
    assert!(Rc::ptr_eq(&first, &doc.parse()));

    doc.edit_source(9, 1, "y").unwrap();
    let second = doc.parse();
    assert!(!Rc::ptr_eq(&first, &second));
    assert_eq!(doc.source(), "on f() { y; }");
}

#[test]
fn test_load_discards_memo() {
    let mut doc = loaded("on f() { x; }");
    doc.parse();
    doc.load_source("on f() { x; }").unwrap();
    doc.parse();
    assert_eq!(doc.stats().hits, 0);
}

#[test]
fn test_edit_out_of_bounds() {
    let mut doc = loaded("on f() {}");
    let err = doc.edit_source(5, 10, "").unwrap_err();
    assert_eq!(
        err,
        EditError::OutOfBounds {
            start: 5,
            end: 15,
            len: 9
        }
    );
    // a failed edit leaves the cached parse in place
    assert_eq!(doc.source(), "on f() {}");
}

#[test]
fn test_lexical_before_syntactic_at_same_offset() {
    let mut doc = loaded("let x = #;");
    let codes: Vec<ErrorCode> = doc.diagnostics().iter().map(|d| d.code).collect();
    // the stray `#` is then skipped at top level as well
    assert_eq!(
        codes,
        vec![
            ErrorCode::E0002,
            ErrorCode::E1006,
            ErrorCode::E1002,
            ErrorCode::E1007
        ]
    );
}

#[test]
fn test_error_limit_and_warnings() {
    let source = "let a = x && y || z; let = ; let = ;";
    let mut doc = Document::new(DocumentConfig::unlimited());
    doc.load_source(source).unwrap();
    assert_eq!(doc.diagnostics().len(), 5);

    let mut doc = Document::new(DocumentConfig::unlimited().with_error_limit(2));
    doc.load_source(source).unwrap();
    assert_eq!(doc.diagnostics().len(), 2);

    let mut doc = Document::new(DocumentConfig::unlimited().without_warnings());
    doc.load_source(source).unwrap();
    assert!(doc.diagnostics().iter().all(Diagnostic::is_error));
    assert_eq!(doc.diagnostics().len(), 4);
}

#[test]
fn test_default_config() {
    let config = DocumentConfig::default();
    assert_eq!(config.error_limit, 100);
    assert!(config.include_warnings);
    assert_eq!(DocumentConfig::unlimited().error_limit, 0);
}
