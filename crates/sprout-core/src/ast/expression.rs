//! Expression AST nodes

use super::operator::{Operator, UnaryOperator};
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression AST node
///
/// Templated property conditions only ever produce constant expressions, so
/// there are no field references or calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value
    Literal(Value),

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(Value::String(s)) => write!(f, "{:?}", s),
            Expression::Literal(v) => write!(f, "{}", v),
            Expression::Binary { left, op, right } => write!(f, "({} {} {})", left, op, right),
            Expression::Unary { op, operand } => write!(f, "{}{}", op, operand),
        }
    }
}
