//! Condition chains
//!
//! A [`Conditional`] is an ordered sequence of conditions joined by `or` /
//! `and`, built incrementally through a fluent API:
//!
//! ```text
//! cond.on_property("cache.enabled").and().on_missing_bean("cache")
//! ```
//!
//! Evaluation walks the chain left to right. At each link the operator
//! decides whether the rest of the chain still matters: `or` stops on a
//! match, `and` stops on a miss. There is no precedence; `a.and(b).or(c)`
//! reads as `a && (b || c)`. Nest a `Conditional` or a
//! [`ConditionGroup`](super::ConditionGroup) to group explicitly.

use super::{
    BeanCondition, Condition, ExpressionCondition, FunctionCondition, MissingBeanCondition,
    MissingPropertyCondition, NotCondition, ProfileCondition, PropertyCondition,
    PropertyValueCondition,
};
use crate::context::{BeanSelector, ConditionContext};
use crate::error::{Result, RuntimeError};
use serde::{Deserialize, Serialize};
use sprout_core::Value;
use std::fmt;
use std::str::FromStr;

/// Operator joining a link to the rest of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainOperator {
    Or,
    #[default]
    And,
}

impl fmt::Display for ChainOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainOperator::Or => write!(f, "or"),
            ChainOperator::And => write!(f, "and"),
        }
    }
}

impl FromStr for ChainOperator {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "or" | "OR" | "||" => Ok(ChainOperator::Or),
            "and" | "AND" | "&&" => Ok(ChainOperator::And),
            _ => Err(RuntimeError::UnknownOperator(s.to_string())),
        }
    }
}

/// One link of a chain
///
/// The operator joins this link to the next one and is ignored on the last link.
#[derive(Default)]
pub struct ConditionNode {
    condition: Option<Box<dyn Condition>>,
    operator: ChainOperator,
}

impl ConditionNode {
    pub fn condition(&self) -> Option<&dyn Condition> {
        self.condition.as_deref()
    }

    pub fn operator(&self) -> ChainOperator {
        self.operator
    }
}

/// Fluent builder and owner of a condition chain
///
/// An empty chain matches every context.
pub struct Conditional {
    /// Never empty; the last node is the builder cursor
    nodes: Vec<ConditionNode>,
}

impl Default for Conditional {
    fn default() -> Self {
        Self {
            nodes: vec![ConditionNode::default()],
        }
    }
}

impl Conditional {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the chain is a single link without a condition
    ///
    /// An operator call leaves the chain non-empty even before a condition
    /// follows it, so an empty chain always matches.
    pub fn is_empty(&self) -> bool {
        matches!(self.nodes.as_slice(), [only] if only.condition.is_none())
    }

    /// Number of attached conditions
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.condition.is_some()).count()
    }

    pub fn nodes(&self) -> &[ConditionNode] {
        &self.nodes
    }

    /// Attach a condition at the cursor
    ///
    /// Two conditions attached back to back are joined with `and`.
    pub fn on_condition(&mut self, condition: impl Condition + 'static) -> &mut Self {
        if self.cursor().condition.is_some() {
            self.link(ChainOperator::And);
        }
        self.cursor().condition = Some(Box::new(condition));
        self
    }

    /// Join what is built so far to the next condition with `operator`
    pub fn link(&mut self, operator: ChainOperator) -> &mut Self {
        self.cursor().operator = operator;
        self.nodes.push(ConditionNode::default());
        self
    }

    pub fn or(&mut self) -> &mut Self {
        self.link(ChainOperator::Or)
    }

    pub fn and(&mut self) -> &mut Self {
        self.link(ChainOperator::And)
    }

    pub fn on_condition_not(&mut self, condition: impl Condition + 'static) -> &mut Self {
        self.on_condition(NotCondition::new(condition))
    }

    pub fn on_property(&mut self, name: impl Into<String>) -> &mut Self {
        self.on_condition(PropertyCondition::new(name))
    }

    pub fn on_missing_property(&mut self, name: impl Into<String>) -> &mut Self {
        self.on_condition(MissingPropertyCondition::new(name))
    }

    pub fn on_property_value(&mut self, name: impl Into<String>, expected: impl Into<Value>) -> &mut Self {
        self.on_condition(PropertyValueCondition::new(name, expected))
    }

    /// Like [`on_property_value`](Self::on_property_value) but matches when the property is unset
    pub fn on_property_value_or_missing(
        &mut self,
        name: impl Into<String>,
        expected: impl Into<Value>,
    ) -> &mut Self {
        self.on_condition(PropertyValueCondition::new(name, expected).match_if_missing(true))
    }

    pub fn on_bean(&mut self, selector: impl Into<BeanSelector>) -> &mut Self {
        self.on_condition(BeanCondition::new(selector))
    }

    pub fn on_missing_bean(&mut self, selector: impl Into<BeanSelector>) -> &mut Self {
        self.on_condition(MissingBeanCondition::new(selector))
    }

    pub fn on_profile(&mut self, profile: impl Into<String>) -> &mut Self {
        self.on_condition(ProfileCondition::new(profile))
    }

    pub fn on_matches<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&dyn ConditionContext) -> bool + Send + Sync + 'static,
    {
        self.on_condition(FunctionCondition::new(predicate))
    }

    pub fn on_expression(&mut self, expression: impl Into<String>) -> &mut Self {
        self.on_condition(ExpressionCondition::new(expression))
    }

    fn cursor(&mut self) -> &mut ConditionNode {
        if self.nodes.is_empty() {
            self.nodes.push(ConditionNode::default());
        }
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }
}

impl Condition for Conditional {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        for (index, node) in self.nodes.iter().enumerate() {
            let next = self.nodes.get(index + 1);

            let Some(condition) = node.condition.as_deref() else {
                // an unattached head is only legal when nothing follows it
                if next.is_none() && index == 0 {
                    return Ok(true);
                }
                return Err(RuntimeError::MalformedChain);
            };

            if next.is_some_and(|n| n.condition.is_none()) {
                return Err(RuntimeError::MalformedChain);
            }

            let result = condition.matches(ctx)?;
            tracing::debug!("condition {} -> {}", condition.describe(), result);

            if next.is_none() {
                return Ok(result);
            }

            match (node.operator, result) {
                (ChainOperator::Or, true) | (ChainOperator::And, false) => {
                    tracing::debug!(
                        "short-circuit after {} at link {}: skipping {} remaining",
                        node.operator,
                        index,
                        self.nodes.len() - index - 1
                    );
                    return Ok(result);
                }
                _ => {}
            }
        }
        Ok(true)
    }

    fn describe(&self) -> String {
        format!("({})", self)
    }
}

impl fmt::Display for Conditional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty>");
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node.condition.as_deref() {
                Some(condition) => write!(f, "{}", condition.describe())?,
                None => write!(f, "?")?,
            }
            if index + 1 < self.nodes.len() {
                write!(f, " {} ", node.operator)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Conditional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Conditional({})", self)
    }
}
