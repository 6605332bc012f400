//! Template expression evaluation
//!
//! A small constant-expression evaluator. Templated property-value
//! conditions substitute the actual property value into their expected text
//! and hand the result here.

mod operators;

use crate::error::Result;
use operators::{execute_binary_op, execute_compare, execute_unary_op};
use sprout_core::ast::{Expression, Operator};
use sprout_core::Value;
use sprout_parser::ExpressionParser;

/// Evaluate an expression tree to a value
///
/// `&&` and `||` short-circuit and require boolean operands.
pub fn evaluate(expr: &Expression) -> Result<Value> {
    match expr {
        Expression::Literal(value) => Ok(value.clone()),
        Expression::Unary { op, operand } => execute_unary_op(&evaluate(operand)?, op),
        Expression::Binary { left, op, right } => match op {
            Operator::And => {
                if !evaluate(left)?.to_bool()? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(evaluate(right)?.to_bool()?))
            }
            Operator::Or => {
                if evaluate(left)?.to_bool()? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(evaluate(right)?.to_bool()?))
            }
            op if op.is_comparison() => {
                let l = evaluate(left)?;
                let r = evaluate(right)?;
                Ok(Value::Bool(execute_compare(&l, op, &r)?))
            }
            op => execute_binary_op(&evaluate(left)?, op, &evaluate(right)?),
        },
    }
}

/// Parse and evaluate expression text
pub fn evaluate_str(input: &str) -> Result<Value> {
    let expr = ExpressionParser::parse(input)?;
    evaluate(&expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    #[test]
    fn test_comparisons() {
        assert_eq!(evaluate_str("8>=4").unwrap(), Value::Bool(true));
        assert_eq!(evaluate_str("2>=4").unwrap(), Value::Bool(false));
        assert_eq!(evaluate_str("5 != 5").unwrap(), Value::Bool(false));
        assert_eq!(evaluate_str(r#""dev" == "dev""#).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(evaluate_str("1 + 2 * 3").unwrap(), Value::Int(7));
        assert_eq!(evaluate_str("(1 + 2) * 3").unwrap(), Value::Int(9));
        assert_eq!(evaluate_str("7 / 2").unwrap(), Value::Int(3));
        assert_eq!(evaluate_str("7.0 / 2").unwrap(), Value::Float(3.5));
        assert_eq!(evaluate_str("-3 + 1").unwrap(), Value::Int(-2));
    }

    #[test]
    fn test_logical_short_circuit() {
        // right side would be a type error if it were evaluated
        assert_eq!(evaluate_str("false && 1").unwrap(), Value::Bool(false));
        assert_eq!(evaluate_str("true || 1").unwrap(), Value::Bool(true));
        assert!(evaluate_str("true && 1").is_err());
        assert_eq!(evaluate_str("8 > 4 && 8 < 10").unwrap(), Value::Bool(true));
        assert_eq!(evaluate_str("!(8 > 4)").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(evaluate_str("8 >"), Err(RuntimeError::Parse(_))));
        assert!(matches!(evaluate_str("8 / 0"), Err(RuntimeError::DivisionByZero)));
        assert!(matches!(evaluate_str("8 > \"4\""), Err(RuntimeError::TypeError(_))));
        assert!(matches!(evaluate_str("1 && true"), Err(RuntimeError::Core(_))));
    }
}
