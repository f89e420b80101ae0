//! End-to-end document scenarios: load, edit, re-parse, query.

#![allow(clippy::unwrap_used, reason = "edits are written in bounds")]

use std::rc::Rc;

use pretty_assertions::assert_eq;

use ember_ir::ast::{DefinitionKind, ExprKind, Stmt, StmtKind};
use emberc::{Document, DocumentConfig, ErrorCode, Position, Program};

fn document(source: &str) -> Document {
    emberc::init_tracing();
    let mut doc = Document::new(DocumentConfig::unlimited());
    doc.load_source(source).unwrap();
    doc
}

fn statements(program: &Program, index: usize) -> Vec<Rc<Stmt>> {
    match &program.definitions[index].kind {
        DefinitionKind::Handler { body, .. } | DefinitionKind::Function { body, .. } => {
            body.statements.clone()
        }
        other => panic!("expected a handler or function, got {other:?}"),
    }
}

fn codes(doc: &mut Document) -> Vec<ErrorCode> {
    doc.diagnostics().iter().map(|d| d.code).collect()
}

#[test]
fn test_remove_and_reinsert_operand() {
    let source = "on foo() { let x = 1; x = x + 1; }";
    let mut doc = document(source);
    let original = doc.parse();
    assert!(doc.diagnostics().is_empty());

    let at = source.find(" + 1").unwrap();
    doc.edit_source(at, 4, "").unwrap();
    assert_eq!(doc.source(), "on foo() { let x = 1; x = x; }");
    let shortened = doc.parse();
    assert!(doc.diagnostics().is_empty());
    assert!(doc.stats().hits >= 1);

    let stmts = statements(&shortened, 0);
    // `let x = 1;` is untouched and comes straight from the memo
    assert!(Rc::ptr_eq(&stmts[0], &statements(&original, 0)[0]));
    match &stmts[1].kind {
        StmtKind::Assign { value, .. } => {
            assert!(matches!(&value.kind, ExprKind::Identifier(ident) if ident.name == "x"));
        }
        other => panic!("expected assignment, got {other:?}"),
    }

    doc.edit_source(at, 0, " + 1").unwrap();
    assert_eq!(doc.source(), source);
    let restored = doc.parse();
    assert_eq!(*restored, *original);
    assert_eq!(*restored, *document(source).parse());
}

#[test]
fn test_parse_without_edit_is_idempotent() {
    let mut doc = document("on a() { x; }\nfn b() -> int { return 1; }");
    let first = doc.parse();
    let again = doc.parse();
    assert!(Rc::ptr_eq(&first, &again));
}

#[test]
fn test_edit_keeps_other_definitions() {
    let source = "on a() { x; }\non b() { y; }\nlet c = 3;";
    let mut doc = document(source);
    let before = doc.parse();

    doc.edit_source(source.find('y').unwrap(), 1, "y + 2").unwrap();
    let after = doc.parse();
    assert!(Rc::ptr_eq(&before.definitions[0], &after.definitions[0]));
    assert!(!Rc::ptr_eq(&before.definitions[1], &after.definitions[1]));
    assert!(Rc::ptr_eq(&before.definitions[2], &after.definitions[2]));
}

#[test]
fn test_diagnostics_follow_edits() {
    let source = "on a() { }\non b() { 1 = 2; }";
    let mut doc = document(source);
    assert_eq!(codes(&mut doc), vec![ErrorCode::E1008]);
    let start = doc.diagnostics()[0].location.span.start;

    doc.edit_source(0, 0, "// header\n").unwrap();
    assert_eq!(codes(&mut doc), vec![ErrorCode::E1008]);
    assert_eq!(doc.diagnostics()[0].location.span.start, start + 10);
    assert_eq!(doc.diagnostics()[0].location.range.start, Position::new(3, 9));

    let fresh = document(doc.source()).diagnostics().to_vec();
    assert_eq!(doc.diagnostics(), fresh.as_slice());
}

#[test]
fn test_lexical_diagnostics_survive_unrelated_edit() {
    let source = "let s = \"open;\nlet t = 1;";
    let mut doc = document(source);
    let before = doc.diagnostics().to_vec();
    assert!(before.iter().any(|d| d.code == ErrorCode::E0001));

    let at = source.find('1').unwrap();
    doc.edit_source(at, 1, "22").unwrap();
    let fresh = document(doc.source()).diagnostics().to_vec();
    assert_eq!(doc.diagnostics(), fresh.as_slice());
}

#[test]
fn test_fixing_error_removes_diagnostic() {
    let source = "on f() { let x = 1 }";
    let mut doc = document(source);
    assert_eq!(codes(&mut doc), vec![ErrorCode::E1002]);

    doc.edit_source(source.len() - 2, 0, ";").unwrap();
    assert!(doc.diagnostics().is_empty());
}

#[test]
fn test_node_at() {
    let mut doc = document("on foo() { let x = 1; }");
    let kind = |doc: &mut Document, col| doc.node_at(Position::new(1, col)).map(|n| n.kind_name());
    assert_eq!(kind(&mut doc, 19), Some("expression"));
    assert_eq!(kind(&mut doc, 15), Some("identifier"));
    assert_eq!(kind(&mut doc, 2), Some("definition"));
    assert_eq!(kind(&mut doc, 30), None);
}

#[test]
fn test_tokens_after_parse() {
    let mut doc = document("on f() {}");
    doc.parse();
    let texts: Vec<&str> = doc.tokens().iter().map(|t| t.content()).collect();
    assert_eq!(texts, vec!["on", " ", "f", "(", ")", " ", "{", "}"]);
}
