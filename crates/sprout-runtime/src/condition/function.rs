//! Closure-backed and negated conditions

use super::Condition;
use crate::context::ConditionContext;
use crate::error::Result;
use std::fmt;

type Predicate = Box<dyn Fn(&dyn ConditionContext) -> Result<bool> + Send + Sync>;

/// Condition that delegates to a closure
pub struct FunctionCondition {
    predicate: Predicate,
}

impl FunctionCondition {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&dyn ConditionContext) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(move |ctx| Ok(predicate(ctx))),
        }
    }

    /// A closure that may itself fail
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&dyn ConditionContext) -> Result<bool> + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl Condition for FunctionCondition {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        (self.predicate)(ctx)
    }

    fn describe(&self) -> String {
        "FunctionCondition".to_string()
    }
}

impl fmt::Debug for FunctionCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FunctionCondition")
    }
}

/// Logical negation; errors from the inner condition pass through
pub struct NotCondition {
    inner: Box<dyn Condition>,
}

impl NotCondition {
    pub fn new(condition: impl Condition + 'static) -> Self {
        Self {
            inner: Box::new(condition),
        }
    }
}

impl Condition for NotCondition {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        Ok(!self.inner.matches(ctx)?)
    }

    fn describe(&self) -> String {
        format!("Not({})", self.inner.describe())
    }
}
