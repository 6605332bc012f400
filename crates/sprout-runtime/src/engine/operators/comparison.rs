//! Comparison operator execution

use crate::error::{Result, RuntimeError};
use sprout_core::ast::Operator;
use sprout_core::Value;
use std::cmp::Ordering;

/// Execute a comparison operation
///
/// Numbers compare across int and float; strings compare lexicographically;
/// booleans support only `==` and `!=`. Mixed kinds are a type error rather
/// than simply unequal.
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    let ordering = match (left, right) {
        (Value::Int(l), Value::Int(r)) => Some(l.cmp(r)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            left.to_f64()?.partial_cmp(&right.to_f64()?)
        }
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        (Value::Bool(l), Value::Bool(r)) => {
            return match op {
                Operator::Eq => Ok(l == r),
                Operator::Ne => Ok(l != r),
                _ => Err(RuntimeError::TypeError(format!(
                    "Cannot order bool values with {}",
                    op
                ))),
            };
        }
        _ => {
            return Err(RuntimeError::TypeError(format!(
                "Cannot compare {} and {} with {}",
                left.kind(),
                right.kind(),
                op
            )))
        }
    };

    // NaN orders as nothing: only != holds
    let Some(ordering) = ordering else {
        return Ok(*op == Operator::Ne);
    };

    match op {
        Operator::Eq => Ok(ordering == Ordering::Equal),
        Operator::Ne => Ok(ordering != Ordering::Equal),
        Operator::Gt => Ok(ordering == Ordering::Greater),
        Operator::Ge => Ok(ordering != Ordering::Less),
        Operator::Lt => Ok(ordering == Ordering::Less),
        Operator::Le => Ok(ordering != Ordering::Greater),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "{} is not a comparison operator",
            op
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_comparisons() {
        assert!(execute_compare(&Value::Int(8), &Operator::Ge, &Value::Int(4)).unwrap());
        assert!(!execute_compare(&Value::Int(2), &Operator::Ge, &Value::Int(4)).unwrap());
        assert!(execute_compare(&Value::Int(2), &Operator::Eq, &Value::Float(2.0)).unwrap());
        assert!(execute_compare(&Value::Float(2.5), &Operator::Lt, &Value::Int(3)).unwrap());
    }

    #[test]
    fn test_string_comparisons() {
        assert!(execute_compare(&Value::from("prod"), &Operator::Eq, &Value::from("prod")).unwrap());
        assert!(execute_compare(&Value::from("a"), &Operator::Lt, &Value::from("b")).unwrap());
    }

    #[test]
    fn test_bool_comparisons() {
        assert!(execute_compare(&Value::Bool(true), &Operator::Ne, &Value::Bool(false)).unwrap());
        assert!(execute_compare(&Value::Bool(true), &Operator::Gt, &Value::Bool(false)).is_err());
    }

    #[test]
    fn test_mixed_kinds_are_type_errors() {
        let err = execute_compare(&Value::Int(1), &Operator::Eq, &Value::from("1")).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeError(_)));
    }

    #[test]
    fn test_nan() {
        let nan = Value::Float(f64::NAN);
        assert!(!execute_compare(&nan, &Operator::Eq, &nan).unwrap());
        assert!(execute_compare(&nan, &Operator::Ne, &nan).unwrap());
    }
}
