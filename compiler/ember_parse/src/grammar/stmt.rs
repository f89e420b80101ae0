//! Blocks and statements.

use std::rc::Rc;

use ember_diagnostic::ErrorCode;
use ember_ir::ast::{Block, ElseBranch, Expr, Stmt, StmtKind, Trivia};
use ember_ir::{Token, TokenType};
use ember_stack::ensure_sufficient_stack;

use super::first_token;
use crate::{ParseFlags, Parser, SeriesConfig, STATEMENT_RECOVERY};

impl Parser<'_> {
    /// `{ statements }`
    pub(crate) fn block(&mut self) -> Option<Rc<Block>> {
        self.memoized(|p| {
            let open = p.eat(TokenType::LBrace)?;
            let trivia = p.take_trivia();
            let statements = p
                .series(
                    &SeriesConfig::until(TokenType::RBrace).resync(STATEMENT_RECOVERY),
                    Self::statement,
                )
                .items;
            p.expect(TokenType::RBrace);
            Some(Rc::new(Block {
                statements,
                tokens: p.slice_from(&open),
                trivia,
            }))
        })
    }

    pub(crate) fn block_or_missing(&mut self) -> Rc<Block> {
        self.block().unwrap_or_else(|| {
            self.report_missing(ErrorCode::E1005);
            Rc::new(Block::missing())
        })
    }

    pub(crate) fn statement(&mut self) -> Option<Rc<Stmt>> {
        ensure_sufficient_stack(|| self.memoized(Self::statement_body))
    }

    fn statement_body(&mut self) -> Option<Rc<Stmt>> {
        match self.peek_kind()? {
            TokenType::Let => self.let_statement(),
            TokenType::If => self.if_statement(),
            TokenType::While => self.while_statement(),
            TokenType::Return => self.return_statement(),
            TokenType::Break | TokenType::Continue => self.loop_jump(),
            TokenType::LBrace if !self.object_literal_ahead(false) => {
                let block = self.block()?;
                let tokens = block.tokens.clone();
                Some(Rc::new(Stmt {
                    kind: StmtKind::Block(block),
                    tokens,
                    trivia: Trivia::new(),
                }))
            }
            _ => self.expression_statement(),
        }
    }

    fn statement_node(
        &self,
        kind: StmtKind,
        first: &Rc<Token>,
        trivia: Trivia,
    ) -> Option<Rc<Stmt>> {
        Some(Rc::new(Stmt {
            kind,
            tokens: self.slice_from(first),
            trivia,
        }))
    }

    /// `let name [: type] = value;`
    fn let_statement(&mut self) -> Option<Rc<Stmt>> {
        let keyword = self.advance()?;
        let trivia = self.take_trivia();
        let name = self.identifier_or_missing();
        let ty = self.annotation();
        let value = match self.expect(TokenType::Assign) {
            Some(_) => self.expression_or_missing(),
            None => Rc::new(Expr::missing()),
        };
        self.expect(TokenType::Semicolon);
        self.statement_node(StmtKind::Let { name, ty, value }, &keyword, trivia)
    }

    /// `if cond { ... } [else if ... | else { ... }]`
    fn if_statement(&mut self) -> Option<Rc<Stmt>> {
        let keyword = self.advance()?;
        let trivia = self.take_trivia();
        let cond = self.condition();
        let then_branch = self.block_or_missing();
        let else_branch = match self.eat(TokenType::Else) {
            None => None,
            Some(_) if self.check(TokenType::If) => self.statement().map(ElseBranch::If),
            Some(_) => Some(ElseBranch::Block(self.block_or_missing())),
        };
        self.statement_node(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            &keyword,
            trivia,
        )
    }

    /// `while cond { ... }`
    fn while_statement(&mut self) -> Option<Rc<Stmt>> {
        let keyword = self.advance()?;
        let trivia = self.take_trivia();
        let cond = self.condition();
        let body = self.with_flags(
            ParseFlags::IN_LOOP,
            ParseFlags::empty(),
            Self::block_or_missing,
        );
        self.statement_node(StmtKind::While { cond, body }, &keyword, trivia)
    }

    /// Conditions end where the block starts, so `{` is not an object here.
    fn condition(&mut self) -> Rc<Expr> {
        self.with_flags(
            ParseFlags::NO_OBJECT_LITERAL,
            ParseFlags::empty(),
            Self::expression_or_missing,
        )
    }

    /// `return [value];`
    fn return_statement(&mut self) -> Option<Rc<Stmt>> {
        let keyword = self.advance()?;
        let trivia = self.take_trivia();
        if !self.flags().in_function() {
            self.report_token(&keyword, ErrorCode::E1001, &[keyword.content()]);
        }
        let value = match self.peek_kind() {
            None | Some(TokenType::Semicolon | TokenType::RBrace) => None,
            Some(_) => self.expression(),
        };
        self.expect(TokenType::Semicolon);
        self.statement_node(StmtKind::Return(value), &keyword, trivia)
    }

    /// `break;` or `continue;`
    fn loop_jump(&mut self) -> Option<Rc<Stmt>> {
        let keyword = self.advance()?;
        let trivia = self.take_trivia();
        if !self.flags().in_loop() {
            self.report_token(&keyword, ErrorCode::E1001, &[keyword.content()]);
        }
        self.expect(TokenType::Semicolon);
        let kind = match keyword.kind() {
            TokenType::Break => StmtKind::Break,
            _ => StmtKind::Continue,
        };
        self.statement_node(kind, &keyword, trivia)
    }

    /// `expr;` or `target = value;`
    fn expression_statement(&mut self) -> Option<Rc<Stmt>> {
        let expr = self.expression()?;
        let first = first_token(&*expr)?;

        let kind = if self.eat(TokenType::Assign).is_some() {
            let value = self.expression_or_missing();
            let target = if expr.is_assignable() {
                expr
            } else {
                if let Some(slice) = &expr.tokens {
                    self.report_slice(slice, ErrorCode::E1008);
                }
                Rc::new(Expr::missing())
            };
            StmtKind::Assign { target, value }
        } else {
            StmtKind::Expr(expr)
        };
        self.expect(TokenType::Semicolon);
        self.statement_node(kind, &first, Trivia::new())
    }
}
