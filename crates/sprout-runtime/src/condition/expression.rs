//! Expression condition

use super::Condition;
use crate::context::ConditionContext;
use crate::error::{Result, RuntimeError};

/// Reserved extension point; evaluating it always fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionCondition {
    expression: String,
}

impl ExpressionCondition {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl Condition for ExpressionCondition {
    fn matches(&self, _ctx: &dyn ConditionContext) -> Result<bool> {
        Err(RuntimeError::Unimplemented(format!(
            "expression condition '{}'",
            self.expression
        )))
    }

    fn describe(&self) -> String {
        format!("ExpressionCondition({})", self.expression)
    }
}
