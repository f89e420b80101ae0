//! Grammar rules.
//!
//! Rules return `None` when nothing they recognize starts at the cursor;
//! that is not an error by itself. The `*_or_missing` variants are used
//! where a construct is required: they report it and substitute a
//! placeholder so the enclosing rule can carry on.

mod definition;
mod expr;
mod stmt;
mod ty;

use std::rc::Rc;

use ember_diagnostic::ErrorCode;
use ember_ir::ast::{Identifier, TypeExpr};
use ember_ir::{Token, TokenType};

use crate::{ParseFlags, Parser};

impl Parser<'_> {
    pub(crate) fn identifier(&mut self) -> Option<Identifier> {
        let token = self.eat(TokenType::Identifier)?;
        let trivia = self.take_trivia();
        Some(Identifier::from_token(token, trivia))
    }

    pub(crate) fn identifier_or_missing(&mut self) -> Identifier {
        self.identifier().unwrap_or_else(|| {
            self.report_missing(ErrorCode::E1003);
            Identifier::missing()
        })
    }

    /// Optional `: type`.
    pub(crate) fn annotation(&mut self) -> Option<Rc<TypeExpr>> {
        self.eat(TokenType::Colon)?;
        Some(self.type_or_missing())
    }

    /// Run `f` inside brackets, where `{` starts an object literal again.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.with_flags(ParseFlags::empty(), ParseFlags::NO_OBJECT_LITERAL, f)
    }
}

/// First token of a node, if it has any.
pub(crate) fn first_token<N: ember_ir::ast::Node>(node: &N) -> Option<Rc<Token>> {
    node.tokens().map(|slice| Rc::clone(&slice.first))
}
