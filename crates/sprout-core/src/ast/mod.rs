//! Abstract Syntax Tree for template expressions

pub mod expression;
pub mod operator;

pub use expression::Expression;
pub use operator::{Operator, UnaryOperator};
