//! Unary operator execution

use crate::error::{Result, RuntimeError};
use sprout_core::ast::UnaryOperator;
use sprout_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: &UnaryOperator) -> Result<Value> {
    match (op, operand) {
        (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOperator::Negate, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| RuntimeError::InvalidOperation(format!("integer overflow in -{}", n))),
        (UnaryOperator::Negate, Value::Float(n)) => Ok(Value::Float(-n)),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply {} to {}",
            op,
            operand.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_ops() {
        assert_eq!(
            execute_unary_op(&Value::Bool(true), &UnaryOperator::Not).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            execute_unary_op(&Value::Int(3), &UnaryOperator::Negate).unwrap(),
            Value::Int(-3)
        );
        assert!(execute_unary_op(&Value::Int(3), &UnaryOperator::Not).is_err());
        assert!(execute_unary_op(&Value::from("x"), &UnaryOperator::Negate).is_err());
    }
}
