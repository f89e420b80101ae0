//! Top-level definitions.

use std::rc::Rc;

use ember_ir::ast::{Block, Definition, DefinitionKind, Expr, Param, Trivia, TypeExpr};
use ember_ir::TokenType;

use crate::{ParseFlags, Parser, SeriesConfig};

impl Parser<'_> {
    /// `on`, `fn`, `let` or `type` definition.
    pub(crate) fn definition(&mut self) -> Option<Rc<Definition>> {
        self.memoized(|p| {
            let kind = p.peek_kind()?;
            if !matches!(
                kind,
                TokenType::On | TokenType::Fn | TokenType::Let | TokenType::Type
            ) {
                return None;
            }
            let keyword = p.advance()?;
            let trivia = p.take_trivia();

            let kind = match kind {
                TokenType::On => {
                    let name = p.identifier_or_missing();
                    let params = p.params();
                    let body = p.function_body();
                    DefinitionKind::Handler { name, params, body }
                }
                TokenType::Fn => {
                    let name = p.identifier_or_missing();
                    let params = p.params();
                    let ret = match p.eat(TokenType::Arrow) {
                        Some(_) => Some(p.type_or_missing()),
                        None => None,
                    };
                    let body = p.function_body();
                    DefinitionKind::Function {
                        name,
                        params,
                        ret,
                        body,
                    }
                }
                TokenType::Let => {
                    let name = p.identifier_or_missing();
                    let ty = p.annotation();
                    let value = match p.expect(TokenType::Assign) {
                        Some(_) => p.expression_or_missing(),
                        None => Rc::new(Expr::missing()),
                    };
                    p.expect(TokenType::Semicolon);
                    DefinitionKind::Global { name, ty, value }
                }
                _ => {
                    let name = p.identifier_or_missing();
                    let ty = match p.expect(TokenType::Assign) {
                        Some(_) => p.type_or_missing(),
                        None => Rc::new(TypeExpr::missing()),
                    };
                    p.expect(TokenType::Semicolon);
                    DefinitionKind::TypeAlias { name, ty }
                }
            };

            Some(Rc::new(Definition {
                kind,
                tokens: p.slice_from(&keyword),
                trivia,
            }))
        })
    }

    /// `( name [: type], ... )`
    fn params(&mut self) -> Vec<Param> {
        if self.expect(TokenType::LParen).is_none() {
            return Vec::new();
        }
        let params = self
            .series(&SeriesConfig::comma(TokenType::RParen), Self::param)
            .items;
        self.expect(TokenType::RParen);
        params
    }

    fn param(&mut self) -> Option<Param> {
        let name = self.identifier()?;
        let ty = self.annotation();
        let tokens = super::first_token(&name).and_then(|first| self.slice_from(&first));
        Some(Param {
            name,
            ty,
            tokens,
            trivia: Trivia::new(),
        })
    }

    /// Handler and function bodies: `return` is allowed, loops start over.
    fn function_body(&mut self) -> Rc<Block> {
        self.with_flags(
            ParseFlags::IN_FUNCTION,
            ParseFlags::IN_LOOP | ParseFlags::NO_OBJECT_LITERAL,
            Self::block_or_missing,
        )
    }
}
