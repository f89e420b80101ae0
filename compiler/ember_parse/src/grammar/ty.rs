//! Type expressions: `A | B`, `T[]`, names, `{ field: T }`, `(T)`.

use std::rc::Rc;

use ember_diagnostic::ErrorCode;
use ember_ir::ast::{FieldType, Identifier, TokenSlice, Trivia, TypeExpr, TypeKind};
use ember_ir::TokenType;
use ember_stack::ensure_sufficient_stack;

use super::first_token;
use crate::{Parser, SeriesConfig};

impl Parser<'_> {
    pub(crate) fn type_expr(&mut self) -> Option<Rc<TypeExpr>> {
        ensure_sufficient_stack(|| self.memoized(Self::union_type))
    }

    pub(crate) fn type_or_missing(&mut self) -> Rc<TypeExpr> {
        self.type_expr().unwrap_or_else(|| {
            self.report_missing(ErrorCode::E1004);
            Rc::new(TypeExpr::missing())
        })
    }

    fn union_type(&mut self) -> Option<Rc<TypeExpr>> {
        let head = self.postfix_type()?;
        if !self.check(TokenType::Pipe) {
            return Some(head);
        }
        let first = first_token(&*head);
        let mut members = vec![head];
        while self.eat(TokenType::Pipe).is_some() {
            let member = self.postfix_type().unwrap_or_else(|| {
                self.report_missing(ErrorCode::E1004);
                Rc::new(TypeExpr::missing())
            });
            members.push(member);
        }
        Some(Rc::new(TypeExpr {
            kind: TypeKind::Union(members),
            tokens: first.and_then(|first| self.slice_from(&first)),
            trivia: Trivia::new(),
        }))
    }

    /// `T[]`, any number of times.
    fn postfix_type(&mut self) -> Option<Rc<TypeExpr>> {
        let mut ty = self.type_atom()?;
        while self.eat(TokenType::LBracket).is_some() {
            self.expect(TokenType::RBracket);
            let first = first_token(&*ty);
            ty = Rc::new(TypeExpr {
                kind: TypeKind::Array(ty),
                tokens: first.and_then(|first| self.slice_from(&first)),
                trivia: Trivia::new(),
            });
        }
        Some(ty)
    }

    fn type_atom(&mut self) -> Option<Rc<TypeExpr>> {
        let token = self.peek()?;
        match token.kind() {
            TokenType::Identifier => {
                self.advance();
                let trivia = self.take_trivia();
                Some(Rc::new(TypeExpr {
                    kind: TypeKind::Named(Identifier::from_token(
                        Rc::clone(&token),
                        Trivia::new(),
                    )),
                    tokens: Some(TokenSlice::single(token)),
                    trivia,
                }))
            }
            TokenType::LBrace => {
                self.advance();
                let trivia = self.take_trivia();
                let fields = self
                    .series(&SeriesConfig::comma(TokenType::RBrace), Self::field_type)
                    .items;
                self.expect(TokenType::RBrace);
                Some(Rc::new(TypeExpr {
                    kind: TypeKind::Record(fields),
                    tokens: self.slice_from(&token),
                    trivia,
                }))
            }
            TokenType::LParen => {
                self.advance();
                let trivia = self.take_trivia();
                let inner = self.type_or_missing();
                self.expect(TokenType::RParen);
                Some(Rc::new(TypeExpr {
                    kind: TypeKind::Paren(inner),
                    tokens: self.slice_from(&token),
                    trivia,
                }))
            }
            _ => None,
        }
    }

    /// `name: T` inside a record type.
    fn field_type(&mut self) -> Option<FieldType> {
        let name = self.identifier()?;
        let ty = match self.expect(TokenType::Colon) {
            Some(_) => self.type_or_missing(),
            None => Rc::new(TypeExpr::missing()),
        };
        let tokens = first_token(&name).and_then(|first| self.slice_from(&first));
        Some(FieldType { name, ty, tokens })
    }
}
