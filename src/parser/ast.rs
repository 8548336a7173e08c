// AST (Abstract Syntax Tree) definitions for the expression language

use crate::parser::lexer::Token;
use std::fmt;

/// Decoded numeric literal.
///
/// The lexer decides between the two variants from the lexeme alone: digits
/// with no fractional part are integers, `N.M` is floating point. The variant
/// is carried unchanged into [`Value::Number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            // Debug keeps the trailing `.0` on integral floats
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// Literal values that can appear in a [`Expr::Literal`] node
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Number(Number),
    Bool(bool),
    Nil,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Nil => write!(f, "nil"),
        }
    }
}

/// Expression tree produced by the parser.
///
/// Children are owned through `Box`, so a tree has exactly one owner and no
/// sharing. Consumers match on the variants directly; adding a variant makes
/// every non-exhaustive consumer fail to compile.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Grouping(Box<Expr>),
    Literal(Value),
}

impl Expr {
    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary {
            operator,
            right: Box::new(right),
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    /// Number of nodes in the tree, including this one
    #[cfg(test)]
    pub(crate) fn node_count(&self) -> usize {
        match self {
            Expr::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Expr::Unary { right, .. } => 1 + right.node_count(),
            Expr::Grouping(inner) => 1 + inner.node_count(),
            Expr::Literal(_) => 1,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::printer::infix(self))
    }
}
