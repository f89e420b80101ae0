//! Syntax tree.
//!
//! The tree is immutable per parse revision. Children are shared through
//! `Rc` so that a subtree reused from an earlier parse is linked into the
//! new tree without copying. Every node records the tokens it was built
//! from and the comments collected while parsing it; placeholder nodes
//! synthesized after a syntax error have no tokens.
//!
//! Equality is structural: tokens compare by type, text and current
//! position, so a tree built incrementally equals one built from scratch.

mod ops;
mod visitor;

use std::rc::Rc;

use crate::{Location, Token};

pub use ops::{BinaryOp, OpCategory, UnaryOp};
pub use visitor::{
    innermost_at, walk_block, walk_definition, walk_expr, walk_program, walk_stmt, walk_type,
    NodeRef, Visitor,
};

/// First and last token a node was built from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TokenSlice {
    pub first: Rc<Token>,
    pub last: Rc<Token>,
}

impl TokenSlice {
    pub fn new(first: Rc<Token>, last: Rc<Token>) -> Self {
        TokenSlice { first, last }
    }

    pub fn single(token: Rc<Token>) -> Self {
        TokenSlice {
            first: Rc::clone(&token),
            last: token,
        }
    }

    pub fn location(&self) -> Location {
        self.first.location().merge(self.last.location())
    }
}

/// A comment preserved as trivia.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Comment {
    pub token: Rc<Token>,
}

impl Comment {
    pub fn text(&self) -> &str {
        self.token.content()
    }
}

pub type Trivia = Vec<Comment>;

/// Common accessors for nodes that carry a token slice.
pub trait Node {
    fn tokens(&self) -> Option<&TokenSlice>;

    fn trivia(&self) -> &[Comment];

    fn location(&self) -> Option<Location> {
        self.tokens().map(TokenSlice::location)
    }

    /// Placeholders synthesized after a syntax error have no tokens.
    fn is_placeholder(&self) -> bool {
        self.tokens().is_none()
    }
}

macro_rules! impl_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Node for $ty {
                fn tokens(&self) -> Option<&TokenSlice> {
                    self.tokens.as_ref()
                }

                fn trivia(&self) -> &[Comment] {
                    &self.trivia
                }
            }
        )*
    };
}

impl_node!(Program, Definition, Block, Stmt, Expr, TypeExpr, Identifier, Param);

/// Root of a parsed document.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Program {
    pub definitions: Vec<Rc<Definition>>,
    pub tokens: Option<TokenSlice>,
    pub trivia: Trivia,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Identifier {
    pub name: String,
    pub tokens: Option<TokenSlice>,
    pub trivia: Trivia,
}

impl Identifier {
    pub fn from_token(token: Rc<Token>, trivia: Trivia) -> Self {
        Identifier {
            name: token.content().to_string(),
            tokens: Some(TokenSlice::single(token)),
            trivia,
        }
    }

    /// Placeholder for an identifier that could not be parsed.
    pub fn missing() -> Self {
        Identifier {
            name: String::new(),
            tokens: None,
            trivia: Trivia::new(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Param {
    pub name: Identifier,
    pub ty: Option<Rc<TypeExpr>>,
    pub tokens: Option<TokenSlice>,
    pub trivia: Trivia,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub tokens: Option<TokenSlice>,
    pub trivia: Trivia,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DefinitionKind {
    /// `on name(params) { ... }`
    Handler {
        name: Identifier,
        params: Vec<Param>,
        body: Rc<Block>,
    },
    /// `fn name(params) -> type { ... }`
    Function {
        name: Identifier,
        params: Vec<Param>,
        ret: Option<Rc<TypeExpr>>,
        body: Rc<Block>,
    },
    /// `let name: type = value;`
    Global {
        name: Identifier,
        ty: Option<Rc<TypeExpr>>,
        value: Rc<Expr>,
    },
    /// `type name = type;`
    TypeAlias { name: Identifier, ty: Rc<TypeExpr> },
}

impl Definition {
    pub fn name(&self) -> &Identifier {
        match &self.kind {
            DefinitionKind::Handler { name, .. }
            | DefinitionKind::Function { name, .. }
            | DefinitionKind::Global { name, .. }
            | DefinitionKind::TypeAlias { name, .. } => name,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    pub statements: Vec<Rc<Stmt>>,
    pub tokens: Option<TokenSlice>,
    pub trivia: Trivia,
}

impl Block {
    /// Placeholder for a block that could not be parsed.
    pub fn missing() -> Self {
        Block {
            statements: Vec::new(),
            tokens: None,
            trivia: Trivia::new(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub tokens: Option<TokenSlice>,
    pub trivia: Trivia,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StmtKind {
    Let {
        name: Identifier,
        ty: Option<Rc<TypeExpr>>,
        value: Rc<Expr>,
    },
    Assign {
        target: Rc<Expr>,
        value: Rc<Expr>,
    },
    Expr(Rc<Expr>),
    If {
        cond: Rc<Expr>,
        then_branch: Rc<Block>,
        else_branch: Option<ElseBranch>,
    },
    While {
        cond: Rc<Expr>,
        body: Rc<Block>,
    },
    Return(Option<Rc<Expr>>),
    Break,
    Continue,
    Block(Rc<Block>),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ElseBranch {
    If(Rc<Stmt>),
    Block(Rc<Block>),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub tokens: Option<TokenSlice>,
    pub trivia: Trivia,
}

impl Expr {
    /// Placeholder for an expression that could not be parsed.
    pub fn missing() -> Self {
        Expr {
            kind: ExprKind::Missing,
            tokens: None,
            trivia: Trivia::new(),
        }
    }

    /// Variables and fields can be assigned to.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Identifier(_) | ExprKind::Member { .. } | ExprKind::Index { .. }
        )
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(Identifier),
    Binary {
        op: BinaryOp,
        left: Rc<Expr>,
        right: Rc<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Rc<Expr>,
    },
    /// `object.field`
    Member {
        object: Rc<Expr>,
        field: Identifier,
    },
    /// `callee(args)`
    Invoke {
        callee: Rc<Expr>,
        args: Vec<Rc<Expr>>,
    },
    /// `object[index]`
    Index {
        object: Rc<Expr>,
        index: Rc<Expr>,
    },
    Paren(Rc<Expr>),
    Array(Vec<Rc<Expr>>),
    Object(Vec<ObjectField>),
    Missing,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Literal {
    /// Integer literal text as written.
    Integer(String),
    /// Float literal text as written.
    Float(String),
    /// String literal with quotes removed and escapes resolved.
    String(String),
    Bool(bool),
    Null,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ObjectField {
    pub name: Identifier,
    pub value: Rc<Expr>,
    pub tokens: Option<TokenSlice>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeExpr {
    pub kind: TypeKind,
    pub tokens: Option<TokenSlice>,
    pub trivia: Trivia,
}

impl TypeExpr {
    /// Placeholder for a type that could not be parsed.
    pub fn missing() -> Self {
        TypeExpr {
            kind: TypeKind::Missing,
            tokens: None,
            trivia: Trivia::new(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TypeKind {
    Named(Identifier),
    /// `T[]`
    Array(Rc<TypeExpr>),
    /// `A | B | C`
    Union(Vec<Rc<TypeExpr>>),
    /// `{ name: T, ... }`
    Record(Vec<FieldType>),
    Paren(Rc<TypeExpr>),
    Missing,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FieldType {
    pub name: Identifier,
    pub ty: Rc<TypeExpr>,
    pub tokens: Option<TokenSlice>,
}

#[cfg(test)]
mod tests;
