//! Binary arithmetic execution

use crate::error::{Result, RuntimeError};
use sprout_core::ast::Operator;
use sprout_core::Value;

/// Execute an arithmetic operation
///
/// Two integers stay integral (division truncates); any float operand
/// promotes both sides to f64. `+` also concatenates two strings.
pub(crate) fn execute_binary_op(left: &Value, op: &Operator, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => integer_op(*l, op, *r),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            float_op(left.to_f64()?, op, right.to_f64()?)
        }
        (Value::String(l), Value::String(r)) if *op == Operator::Add => {
            Ok(Value::String(format!("{}{}", l, r)))
        }
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply {} to {} and {}",
            op,
            left.kind(),
            right.kind()
        ))),
    }
}

fn integer_op(l: i64, op: &Operator, r: i64) -> Result<Value> {
    let result = match op {
        Operator::Add => l.checked_add(r),
        Operator::Sub => l.checked_sub(r),
        Operator::Mul => l.checked_mul(r),
        Operator::Div => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            l.checked_div(r)
        }
        Operator::Mod => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            l.checked_rem(r)
        }
        _ => {
            return Err(RuntimeError::InvalidOperation(format!(
                "{} is not an arithmetic operator",
                op
            )))
        }
    };

    result.map(Value::Int).ok_or_else(|| {
        RuntimeError::InvalidOperation(format!("integer overflow in {} {} {}", l, op, r))
    })
}

fn float_op(l: f64, op: &Operator, r: f64) -> Result<Value> {
    match op {
        Operator::Add => Ok(Value::Float(l + r)),
        Operator::Sub => Ok(Value::Float(l - r)),
        Operator::Mul => Ok(Value::Float(l * r)),
        Operator::Div | Operator::Mod if r == 0.0 => Err(RuntimeError::DivisionByZero),
        Operator::Div => Ok(Value::Float(l / r)),
        Operator::Mod => Ok(Value::Float(l % r)),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "{} is not an arithmetic operator",
            op
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(
            execute_binary_op(&Value::Int(7), &Operator::Div, &Value::Int(2)).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            execute_binary_op(&Value::Int(7), &Operator::Mod, &Value::Int(2)).unwrap(),
            Value::Int(1)
        );
    }

    #[test]
    fn test_float_promotion() {
        assert_eq!(
            execute_binary_op(&Value::Int(1), &Operator::Add, &Value::Float(0.5)).unwrap(),
            Value::Float(1.5)
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            execute_binary_op(&Value::Int(1), &Operator::Div, &Value::Int(0)),
            Err(RuntimeError::DivisionByZero)
        ));
        assert!(matches!(
            execute_binary_op(&Value::Float(1.0), &Operator::Mod, &Value::Int(0)),
            Err(RuntimeError::DivisionByZero)
        ));
    }

    #[test]
    fn test_overflow_is_error() {
        assert!(matches!(
            execute_binary_op(&Value::Int(i64::MAX), &Operator::Add, &Value::Int(1)),
            Err(RuntimeError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_string_concat_and_mismatch() {
        assert_eq!(
            execute_binary_op(&Value::from("a"), &Operator::Add, &Value::from("b")).unwrap(),
            Value::from("ab")
        );
        assert!(execute_binary_op(&Value::from("a"), &Operator::Sub, &Value::from("b")).is_err());
        assert!(execute_binary_op(&Value::Bool(true), &Operator::Add, &Value::Int(1)).is_err());
    }
}
