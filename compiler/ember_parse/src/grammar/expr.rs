//! Expressions.
//!
//! Binary precedence is a cascade of left-associative loops, loosest
//! first:
//!
//! ```text
//! logical        && ||
//! comparison     == != < <= > >=
//! additive       + -
//! multiplicative * / %
//! unary          - !
//! postfix        .field (args) [index]
//! atom
//! ```

use std::rc::Rc;

use ember_diagnostic::ErrorCode;
use ember_ir::ast::{
    BinaryOp, Expr, ExprKind, Identifier, Literal, ObjectField, OpCategory, TokenSlice, Trivia,
    UnaryOp,
};
use ember_ir::TokenType;
use ember_stack::ensure_sufficient_stack;

use super::first_token;
use crate::{Parser, SeriesConfig, TrailingSeparator};

impl<'a> Parser<'a> {
    pub(crate) fn expression(&mut self) -> Option<Rc<Expr>> {
        ensure_sufficient_stack(|| self.memoized(Self::logical))
    }

    pub(crate) fn expression_or_missing(&mut self) -> Rc<Expr> {
        self.expression().unwrap_or_else(|| {
            self.report_missing(ErrorCode::E1006);
            Rc::new(Expr::missing())
        })
    }

    fn logical(&mut self) -> Option<Rc<Expr>> {
        self.binary(OpCategory::Logical, Self::comparison)
    }

    fn comparison(&mut self) -> Option<Rc<Expr>> {
        self.binary(OpCategory::Comparison, Self::additive)
    }

    fn additive(&mut self) -> Option<Rc<Expr>> {
        self.binary(OpCategory::Additive, Self::multiplicative)
    }

    fn multiplicative(&mut self) -> Option<Rc<Expr>> {
        self.binary(OpCategory::Multiplicative, Self::unary)
    }

    /// One precedence level: `operand (op operand)*`, left-associative.
    ///
    /// The chain remembers its first operator. A logical chain that mixes
    /// `&&` and `||` is almost always missing parentheses, so it gets a
    /// warning (once per chain) but parses normally.
    fn binary(
        &mut self,
        category: OpCategory,
        operand: for<'p> fn(&'p mut Parser<'a>) -> Option<Rc<Expr>>,
    ) -> Option<Rc<Expr>> {
        let mut left = operand(self)?;
        let mut first_op = None;
        let mut warned = false;

        while let Some(op) = self
            .peek_kind()
            .and_then(BinaryOp::from_token)
            .filter(|op| op.category() == category)
        {
            let Some(op_token) = self.advance() else {
                break;
            };
            match first_op {
                None => first_op = Some(op),
                Some(first) if first != op && category == OpCategory::Logical && !warned => {
                    self.report_token::<&str>(&op_token, ErrorCode::W1001, &[]);
                    warned = true;
                }
                Some(_) => {}
            }

            let right = operand(self).unwrap_or_else(|| {
                self.report_missing(ErrorCode::E1006);
                Rc::new(Expr::missing())
            });
            let tokens = first_token(&*left).and_then(|first| self.slice_from(&first));
            left = Rc::new(Expr {
                kind: ExprKind::Binary { op, left, right },
                tokens,
                trivia: Trivia::new(),
            });
        }
        Some(left)
    }

    fn unary(&mut self) -> Option<Rc<Expr>> {
        let Some(op) = self.peek_kind().and_then(UnaryOp::from_token) else {
            return self.postfix();
        };
        let token = self.advance()?;
        let trivia = self.take_trivia();
        let operand = ensure_sufficient_stack(|| self.unary()).unwrap_or_else(|| {
            self.report_missing(ErrorCode::E1006);
            Rc::new(Expr::missing())
        });
        Some(Rc::new(Expr {
            kind: ExprKind::Unary { op, operand },
            tokens: self.slice_from(&token),
            trivia,
        }))
    }

    /// Member access, invocation and indexing, left to right.
    fn postfix(&mut self) -> Option<Rc<Expr>> {
        let mut expr = self.atom()?;
        loop {
            let first = first_token(&*expr);
            let kind = match self.peek_kind() {
                Some(TokenType::Dot) => {
                    self.advance();
                    let field = self.identifier_or_missing();
                    ExprKind::Member { object: expr, field }
                }
                Some(TokenType::LParen) => {
                    self.advance();
                    let args = self.nested(|p| {
                        p.series(
                            &SeriesConfig::comma(TokenType::RParen)
                                .trailing(TrailingSeparator::Forbidden),
                            Self::expression,
                        )
                        .items
                    });
                    self.expect(TokenType::RParen);
                    ExprKind::Invoke { callee: expr, args }
                }
                Some(TokenType::LBracket) => {
                    self.advance();
                    let index = self.nested(Self::expression_or_missing);
                    self.expect(TokenType::RBracket);
                    ExprKind::Index {
                        object: expr,
                        index,
                    }
                }
                _ => break,
            };
            expr = Rc::new(Expr {
                kind,
                tokens: first.and_then(|first| self.slice_from(&first)),
                trivia: Trivia::new(),
            });
        }
        Some(expr)
    }

    fn atom(&mut self) -> Option<Rc<Expr>> {
        let token = self.peek()?;
        let kind = match token.kind() {
            TokenType::Integer => ExprKind::Literal(Literal::Integer(token.content().to_string())),
            TokenType::Float => ExprKind::Literal(Literal::Float(token.content().to_string())),
            TokenType::String => ExprKind::Literal(Literal::String(unescape(token.content()))),
            TokenType::True => ExprKind::Literal(Literal::Bool(true)),
            TokenType::False => ExprKind::Literal(Literal::Bool(false)),
            TokenType::Null => ExprKind::Literal(Literal::Null),
            TokenType::Identifier => {
                ExprKind::Identifier(Identifier::from_token(Rc::clone(&token), Trivia::new()))
            }
            TokenType::LParen => return self.paren(),
            TokenType::LBracket => return self.array(),
            TokenType::LBrace
                if self.flags().allows_object_literal() && self.object_literal_ahead(true) =>
            {
                return self.object();
            }
            _ => return None,
        };
        self.advance();
        let trivia = self.take_trivia();
        Some(Rc::new(Expr {
            kind,
            tokens: Some(TokenSlice::single(token)),
            trivia,
        }))
    }

    /// `( expr )`
    fn paren(&mut self) -> Option<Rc<Expr>> {
        let open = self.advance()?;
        let trivia = self.take_trivia();
        let inner = self.nested(Self::expression_or_missing);
        self.expect(TokenType::RParen);
        Some(Rc::new(Expr {
            kind: ExprKind::Paren(inner),
            tokens: self.slice_from(&open),
            trivia,
        }))
    }

    /// `[ expr, ... ]`
    fn array(&mut self) -> Option<Rc<Expr>> {
        let open = self.advance()?;
        let trivia = self.take_trivia();
        let items = self.nested(|p| {
            p.series(&SeriesConfig::comma(TokenType::RBracket), Self::expression)
                .items
        });
        self.expect(TokenType::RBracket);
        Some(Rc::new(Expr {
            kind: ExprKind::Array(items),
            tokens: self.slice_from(&open),
            trivia,
        }))
    }

    /// Whether the `{` at the cursor opens an object literal: `{ name:`
    /// or, when `allow_empty`, `{}`.
    pub(crate) fn object_literal_ahead(&mut self, allow_empty: bool) -> bool {
        self.look_ahead(|p| {
            p.advance();
            match p.peek_kind() {
                Some(TokenType::RBrace) => allow_empty,
                Some(TokenType::Identifier) => {
                    p.advance();
                    p.check(TokenType::Colon)
                }
                _ => false,
            }
        })
    }

    /// `{ name: expr, ... }`
    fn object(&mut self) -> Option<Rc<Expr>> {
        let open = self.advance()?;
        let trivia = self.take_trivia();
        let fields = self.nested(|p| {
            p.series(&SeriesConfig::comma(TokenType::RBrace), Self::object_field)
                .items
        });
        self.expect(TokenType::RBrace);
        Some(Rc::new(Expr {
            kind: ExprKind::Object(fields),
            tokens: self.slice_from(&open),
            trivia,
        }))
    }

    fn object_field(&mut self) -> Option<ObjectField> {
        let name = self.identifier()?;
        let value = match self.expect(TokenType::Colon) {
            Some(_) => self.expression_or_missing(),
            None => Rc::new(Expr::missing()),
        };
        let tokens = first_token(&name).and_then(|first| self.slice_from(&first));
        Some(ObjectField {
            name,
            value,
            tokens,
        })
    }
}

/// String literal contents: quotes removed, escapes resolved. An
/// unterminated literal runs to the end of its token.
pub(crate) fn unescape(raw: &str) -> String {
    let body = raw.strip_prefix('"').unwrap_or(raw);
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => break,
            },
            c => out.push(c),
        }
    }
    out
}
