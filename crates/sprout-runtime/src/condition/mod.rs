//! Condition model
//!
//! Predicates that decide whether a bean or an optional argument is
//! activated. Primitives query a [`ConditionContext`]; [`ConditionGroup`]
//! and [`Conditional`] combine them.

mod bean;
mod conditional;
mod expression;
mod function;
mod group;
mod profile;
mod property;

pub use bean::{BeanCondition, MissingBeanCondition};
pub use conditional::{ChainOperator, ConditionNode, Conditional};
pub use expression::ExpressionCondition;
pub use function::{FunctionCondition, NotCondition};
pub use group::{ConditionGroup, GroupOperator};
pub use profile::ProfileCondition;
pub use property::{
    MissingPropertyCondition, PropertyCondition, PropertyValueCondition, TEMPLATE_MARKER,
};

use crate::context::ConditionContext;
use crate::error::Result;
use std::sync::Arc;

/// A boolean predicate over a condition context
///
/// `Ok(false)` means the condition is not satisfied. Errors are reserved for
/// malformed conditions and are never folded into `false`.
pub trait Condition: Send + Sync {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool>;

    /// Short human-readable form used in logs
    fn describe(&self) -> String {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Condition")
            .to_string()
    }
}

impl<C: Condition + ?Sized> Condition for Box<C> {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        (**self).matches(ctx)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<C: Condition + ?Sized> Condition for Arc<C> {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        (**self).matches(ctx)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ApplicationContext;

    #[test]
    fn test_boxed_and_shared_conditions() {
        let ctx = ApplicationContext::builder().with_property("a", 1).build();
        let boxed: Box<dyn Condition> = Box::new(PropertyCondition::new("a"));
        let shared: Arc<dyn Condition> = Arc::new(MissingPropertyCondition::new("a"));

        assert!(boxed.matches(&ctx).unwrap());
        assert!(!shared.matches(&ctx).unwrap());
        assert_eq!(boxed.describe(), "PropertyCondition(a)");
    }
}
