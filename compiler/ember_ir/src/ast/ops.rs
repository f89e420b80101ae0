//! Operators.

use std::fmt;

use crate::TokenType;

/// Precedence level of a binary operator.
///
/// Operators in the same category share one left-associative loop in the
/// expression cascade.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum OpCategory {
    Logical,
    Comparison,
    Additive,
    Multiplicative,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn from_token(kind: TokenType) -> Option<BinaryOp> {
        Some(match kind {
            TokenType::AndAnd => BinaryOp::And,
            TokenType::OrOr => BinaryOp::Or,
            TokenType::EqEq => BinaryOp::Eq,
            TokenType::NotEq => BinaryOp::NotEq,
            TokenType::Lt => BinaryOp::Lt,
            TokenType::LtEq => BinaryOp::LtEq,
            TokenType::Gt => BinaryOp::Gt,
            TokenType::GtEq => BinaryOp::GtEq,
            TokenType::Plus => BinaryOp::Add,
            TokenType::Minus => BinaryOp::Sub,
            TokenType::Star => BinaryOp::Mul,
            TokenType::Slash => BinaryOp::Div,
            TokenType::Percent => BinaryOp::Rem,
            _ => return None,
        })
    }

    pub const fn category(self) -> OpCategory {
        match self {
            BinaryOp::And | BinaryOp::Or => OpCategory::Logical,
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => OpCategory::Comparison,
            BinaryOp::Add | BinaryOp::Sub => OpCategory::Additive,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => OpCategory::Multiplicative,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn from_token(kind: TokenType) -> Option<UnaryOp> {
        match kind {
            TokenType::Minus => Some(UnaryOp::Neg),
            TokenType::Bang => Some(UnaryOp::Not),
            _ => None,
        }
    }
}
