use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{EditChain, Position, TokenId, TokenType};

/// Hand-built tree for `on f() { x; }` on a single line.
struct Fixture {
    program: Program,
}

fn tok(chain: &EditChain, id: u64, kind: TokenType, text: &str, start: u32) -> Rc<Token> {
    Rc::new(Token::new(
        TokenId::new(id),
        kind,
        text,
        start,
        Position::new(1, start),
        chain,
    ))
}

fn fixture() -> Fixture {
    let chain = EditChain::new();
    let on = tok(&chain, 0, TokenType::On, "on", 0);
    let name = tok(&chain, 2, TokenType::Identifier, "f", 3);
    let lbrace = tok(&chain, 6, TokenType::LBrace, "{", 7);
    let x = tok(&chain, 8, TokenType::Identifier, "x", 9);
    let semi = tok(&chain, 9, TokenType::Semicolon, ";", 10);
    let rbrace = tok(&chain, 11, TokenType::RBrace, "}", 12);

    let expr = Rc::new(Expr {
        kind: ExprKind::Identifier(Identifier::from_token(Rc::clone(&x), Trivia::new())),
        tokens: Some(TokenSlice::single(Rc::clone(&x))),
        trivia: Trivia::new(),
    });
    let stmt = Rc::new(Stmt {
        kind: StmtKind::Expr(expr),
        tokens: Some(TokenSlice::new(x, semi)),
        trivia: Trivia::new(),
    });
    let body = Rc::new(Block {
        statements: vec![stmt],
        tokens: Some(TokenSlice::new(lbrace, Rc::clone(&rbrace))),
        trivia: Trivia::new(),
    });
    let def = Rc::new(Definition {
        kind: DefinitionKind::Handler {
            name: Identifier::from_token(name, Trivia::new()),
            params: Vec::new(),
            body,
        },
        tokens: Some(TokenSlice::new(Rc::clone(&on), Rc::clone(&rbrace))),
        trivia: Trivia::new(),
    });
    Fixture {
        program: Program {
            definitions: vec![def],
            tokens: Some(TokenSlice::new(on, rbrace)),
            trivia: Trivia::new(),
        },
    }
}

#[test]
fn innermost_finds_deepest_node() {
    let fx = fixture();
    let found = innermost_at(&fx.program, Position::new(1, 9));
    match found {
        Some(NodeRef::Identifier(ident)) => assert_eq!(ident.name, "x"),
        other => panic!("expected identifier, got {other:?}"),
    }
}

#[test]
fn innermost_between_children_returns_parent() {
    let fx = fixture();
    // Column 8 is the space inside the braces.
    let found = innermost_at(&fx.program, Position::new(1, 8)).map(NodeRef::kind_name);
    assert_eq!(found, Some("block"));

    let found = innermost_at(&fx.program, Position::new(1, 1)).map(NodeRef::kind_name);
    assert_eq!(found, Some("definition"));
}

#[test]
fn innermost_outside_program() {
    let fx = fixture();
    assert!(innermost_at(&fx.program, Position::new(1, 13)).is_none());
    assert!(innermost_at(&fx.program, Position::new(2, 0)).is_none());
    assert!(innermost_at(&Program::default(), Position::START).is_none());
}

#[test]
fn node_ref_equality_is_identity() {
    let fx = fixture();
    let def = &fx.program.definitions[0];
    let copy = (**def).clone();
    assert_eq!(**def, copy);
    assert!(NodeRef::Definition(def) == NodeRef::Definition(def));
    assert!(NodeRef::Definition(def) != NodeRef::Definition(&copy));
}

#[test]
fn placeholders_have_no_location() {
    assert!(Expr::missing().is_placeholder());
    assert!(TypeExpr::missing().location().is_none());
    assert!(Block::missing().is_placeholder());
    assert_eq!(Identifier::missing().name, "");
}

#[test]
fn visitor_walks_in_source_order() {
    struct Names(Vec<String>);
    impl<'ast> Visitor<'ast> for Names {
        fn visit_identifier(&mut self, ident: &'ast Identifier) {
            self.0.push(ident.name.clone());
        }
    }

    let fx = fixture();
    let mut names = Names(Vec::new());
    names.visit_program(&fx.program);
    assert_eq!(names.0, vec!["f".to_string(), "x".to_string()]);
}

#[test]
fn operator_categories() {
    assert_eq!(BinaryOp::from_token(TokenType::OrOr), Some(BinaryOp::Or));
    assert_eq!(BinaryOp::Or.category(), OpCategory::Logical);
    assert_eq!(BinaryOp::LtEq.category(), OpCategory::Comparison);
    assert_eq!(BinaryOp::Rem.category(), OpCategory::Multiplicative);
    assert_eq!(BinaryOp::from_token(TokenType::Assign), None);
    assert_eq!(UnaryOp::from_token(TokenType::Bang), Some(UnaryOp::Not));
    assert_eq!(BinaryOp::NotEq.to_string(), "!=");
}

#[test]
fn assignable_targets() {
    let ident = Expr {
        kind: ExprKind::Identifier(Identifier::missing()),
        tokens: None,
        trivia: Trivia::new(),
    };
    assert!(ident.is_assignable());
    let lit = Expr {
        kind: ExprKind::Literal(Literal::Integer("1".into())),
        tokens: None,
        trivia: Trivia::new(),
    };
    assert!(!lit.is_assignable());
}

#[test]
fn definition_name() {
    let fx = fixture();
    assert_eq!(fx.program.definitions[0].name().name, "f");
}
