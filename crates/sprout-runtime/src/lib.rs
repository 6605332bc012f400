//! Sprout Runtime - Condition evaluation for the Sprout conditional activation engine
//!
//! This crate decides whether a component or an optional argument is
//! activated, given a context of properties, registered beans and the
//! active profile.

pub mod condition;
pub mod context;
pub mod engine;
pub mod error;
pub mod option_arg;

// Re-export main types
pub use condition::{
    BeanCondition, ChainOperator, Condition, ConditionGroup, ConditionNode, Conditional,
    ExpressionCondition, FunctionCondition, GroupOperator, MissingBeanCondition,
    MissingPropertyCondition, NotCondition, ProfileCondition, PropertyCondition,
    PropertyValueCondition,
};
pub use context::{
    ApplicationContext, ApplicationContextBuilder, BeanHandle, BeanRegistry, BeanSelector,
    ConditionContext, PropertyStore,
};
pub use error::{Result, RuntimeError};
pub use option_arg::{OptionArg, OptionArgs};
