//! AST visitor.
//!
//! Default `visit_*` implementations call the matching `walk_*` function,
//! which visits children in source order. Override `visit_*` to act on a
//! node and call `walk_*` to keep descending.

use super::{
    Block, Definition, DefinitionKind, ElseBranch, Expr, ExprKind, Identifier, Node, Param,
    Program, Stmt, StmtKind, TypeExpr, TypeKind,
};
use crate::Position;

pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }

    fn visit_definition(&mut self, def: &'ast Definition) {
        walk_definition(self, def);
    }

    fn visit_param(&mut self, param: &'ast Param) {
        self.visit_identifier(&param.name);
        if let Some(ty) = &param.ty {
            self.visit_type(ty);
        }
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &'ast TypeExpr) {
        walk_type(self, ty);
    }

    /// Identifiers are leaves.
    fn visit_identifier(&mut self, ident: &'ast Identifier) {
        let _ = ident;
    }
}

pub fn walk_program<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, program: &'ast Program) {
    for def in &program.definitions {
        visitor.visit_definition(def);
    }
}

pub fn walk_definition<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, def: &'ast Definition) {
    match &def.kind {
        DefinitionKind::Handler { name, params, body } => {
            visitor.visit_identifier(name);
            for param in params {
                visitor.visit_param(param);
            }
            visitor.visit_block(body);
        }
        DefinitionKind::Function {
            name,
            params,
            ret,
            body,
        } => {
            visitor.visit_identifier(name);
            for param in params {
                visitor.visit_param(param);
            }
            if let Some(ret) = ret {
                visitor.visit_type(ret);
            }
            visitor.visit_block(body);
        }
        DefinitionKind::Global { name, ty, value } => {
            visitor.visit_identifier(name);
            if let Some(ty) = ty {
                visitor.visit_type(ty);
            }
            visitor.visit_expr(value);
        }
        DefinitionKind::TypeAlias { name, ty } => {
            visitor.visit_identifier(name);
            visitor.visit_type(ty);
        }
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    for stmt in &block.statements {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match &stmt.kind {
        StmtKind::Let { name, ty, value } => {
            visitor.visit_identifier(name);
            if let Some(ty) = ty {
                visitor.visit_type(ty);
            }
            visitor.visit_expr(value);
        }
        StmtKind::Assign { target, value } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        StmtKind::Expr(expr) => visitor.visit_expr(expr),
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_block(then_branch);
            match else_branch {
                Some(ElseBranch::If(stmt)) => visitor.visit_stmt(stmt),
                Some(ElseBranch::Block(block)) => visitor.visit_block(block),
                None => {}
            }
        }
        StmtKind::While { cond, body } => {
            visitor.visit_expr(cond);
            visitor.visit_block(body);
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::Break | StmtKind::Continue => {}
        StmtKind::Block(block) => visitor.visit_block(block),
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Literal(_) | ExprKind::Missing => {}
        ExprKind::Identifier(ident) => visitor.visit_identifier(ident),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Member { object, field } => {
            visitor.visit_expr(object);
            visitor.visit_identifier(field);
        }
        ExprKind::Invoke { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Index { object, index } => {
            visitor.visit_expr(object);
            visitor.visit_expr(index);
        }
        ExprKind::Paren(inner) => visitor.visit_expr(inner),
        ExprKind::Array(elements) => {
            for element in elements {
                visitor.visit_expr(element);
            }
        }
        ExprKind::Object(fields) => {
            for field in fields {
                visitor.visit_identifier(&field.name);
                visitor.visit_expr(&field.value);
            }
        }
    }
}

pub fn walk_type<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, ty: &'ast TypeExpr) {
    match &ty.kind {
        TypeKind::Named(name) => visitor.visit_identifier(name),
        TypeKind::Array(element) | TypeKind::Paren(element) => visitor.visit_type(element),
        TypeKind::Union(members) => {
            for member in members {
                visitor.visit_type(member);
            }
        }
        TypeKind::Record(fields) => {
            for field in fields {
                visitor.visit_identifier(&field.name);
                visitor.visit_type(&field.ty);
            }
        }
        TypeKind::Missing => {}
    }
}

/// Borrowed reference to any node kind.
#[derive(Copy, Clone, Debug)]
pub enum NodeRef<'ast> {
    Program(&'ast Program),
    Definition(&'ast Definition),
    Param(&'ast Param),
    Block(&'ast Block),
    Stmt(&'ast Stmt),
    Expr(&'ast Expr),
    Type(&'ast TypeExpr),
    Identifier(&'ast Identifier),
}

impl<'ast> NodeRef<'ast> {
    fn node(self) -> &'ast dyn Node {
        match self {
            NodeRef::Program(n) => n,
            NodeRef::Definition(n) => n,
            NodeRef::Param(n) => n,
            NodeRef::Block(n) => n,
            NodeRef::Stmt(n) => n,
            NodeRef::Expr(n) => n,
            NodeRef::Type(n) => n,
            NodeRef::Identifier(n) => n,
        }
    }

    pub fn location(self) -> Option<crate::Location> {
        self.node().location()
    }

    /// Short node kind name, for tooling output.
    pub fn kind_name(self) -> &'static str {
        match self {
            NodeRef::Program(_) => "program",
            NodeRef::Definition(_) => "definition",
            NodeRef::Param(_) => "parameter",
            NodeRef::Block(_) => "block",
            NodeRef::Stmt(_) => "statement",
            NodeRef::Expr(_) => "expression",
            NodeRef::Type(_) => "type",
            NodeRef::Identifier(_) => "identifier",
        }
    }
}

impl PartialEq for NodeRef<'_> {
    /// Identity comparison: same node, not merely an equal one.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.node(), other.node())
    }
}

/// Innermost node whose range contains `pos`.
///
/// Placeholders have no location and are never returned. Positions outside
/// the program's first and last real token yield `None`.
pub fn innermost_at(program: &Program, pos: Position) -> Option<NodeRef<'_>> {
    let mut finder = InnermostFinder { pos, found: None };
    finder.visit_program(program);
    finder.found
}

struct InnermostFinder<'ast> {
    pos: Position,
    found: Option<NodeRef<'ast>>,
}

impl InnermostFinder<'_> {
    fn enter(&mut self, node: &dyn Node) -> bool {
        node.location()
            .is_some_and(|location| location.range.contains(self.pos))
    }
}

impl<'ast> Visitor<'ast> for InnermostFinder<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        if self.enter(program) {
            self.found = Some(NodeRef::Program(program));
            walk_program(self, program);
        }
    }

    fn visit_definition(&mut self, def: &'ast Definition) {
        if self.enter(def) {
            self.found = Some(NodeRef::Definition(def));
            walk_definition(self, def);
        }
    }

    fn visit_param(&mut self, param: &'ast Param) {
        if self.enter(param) {
            self.found = Some(NodeRef::Param(param));
            self.visit_identifier(&param.name);
            if let Some(ty) = &param.ty {
                self.visit_type(ty);
            }
        }
    }

    fn visit_block(&mut self, block: &'ast Block) {
        if self.enter(block) {
            self.found = Some(NodeRef::Block(block));
            walk_block(self, block);
        }
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if self.enter(stmt) {
            self.found = Some(NodeRef::Stmt(stmt));
            walk_stmt(self, stmt);
        }
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if self.enter(expr) {
            self.found = Some(NodeRef::Expr(expr));
            walk_expr(self, expr);
        }
    }

    fn visit_type(&mut self, ty: &'ast TypeExpr) {
        if self.enter(ty) {
            self.found = Some(NodeRef::Type(ty));
            walk_type(self, ty);
        }
    }

    fn visit_identifier(&mut self, ident: &'ast Identifier) {
        if self.enter(ident) {
            self.found = Some(NodeRef::Identifier(ident));
        }
    }
}
