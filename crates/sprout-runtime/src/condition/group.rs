//! Condition groups
//!
//! An unordered `any`/`all`/`none` combinator over a fixed set of conditions.

use super::Condition;
use crate::context::ConditionContext;
use crate::error::{Result, RuntimeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the members of a [`ConditionGroup`] are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupOperator {
    /// At least one member matches
    Any,
    /// Every member matches
    All,
    /// No member matches
    None,
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GroupOperator::Any => "any",
            GroupOperator::All => "all",
            GroupOperator::None => "none",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for GroupOperator {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "or" => Ok(GroupOperator::Any),
            "all" | "and" => Ok(GroupOperator::All),
            "none" => Ok(GroupOperator::None),
            _ => Err(RuntimeError::UnknownOperator(s.to_string())),
        }
    }
}

/// A non-empty set of conditions combined by one operator
pub struct ConditionGroup {
    operator: GroupOperator,
    conditions: Vec<Box<dyn Condition>>,
}

impl ConditionGroup {
    pub fn new(operator: GroupOperator, conditions: Vec<Box<dyn Condition>>) -> Result<Self> {
        if conditions.is_empty() {
            return Err(RuntimeError::EmptyGroup);
        }
        Ok(Self {
            operator,
            conditions,
        })
    }

    /// Build a group from operator text such as `"any"` or `"none"`
    pub fn parse(operator: &str, conditions: Vec<Box<dyn Condition>>) -> Result<Self> {
        Self::new(operator.parse()?, conditions)
    }

    pub fn any(conditions: Vec<Box<dyn Condition>>) -> Result<Self> {
        Self::new(GroupOperator::Any, conditions)
    }

    pub fn all(conditions: Vec<Box<dyn Condition>>) -> Result<Self> {
        Self::new(GroupOperator::All, conditions)
    }

    pub fn none(conditions: Vec<Box<dyn Condition>>) -> Result<Self> {
        Self::new(GroupOperator::None, conditions)
    }

    pub fn operator(&self) -> GroupOperator {
        self.operator
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// True if any member matches, stopping at the first match
    fn any_matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        for condition in &self.conditions {
            if condition.matches(ctx)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Condition for ConditionGroup {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        let result = match self.operator {
            GroupOperator::Any => self.any_matches(ctx)?,
            GroupOperator::None => !self.any_matches(ctx)?,
            GroupOperator::All => {
                let mut all = true;
                for condition in &self.conditions {
                    if !condition.matches(ctx)? {
                        all = false;
                        break;
                    }
                }
                all
            }
        };

        tracing::debug!("{} -> {}", self.describe(), result);
        Ok(result)
    }

    fn describe(&self) -> String {
        let members: Vec<String> = self.conditions.iter().map(|c| c.describe()).collect();
        format!("{}({})", self.operator, members.join(", "))
    }
}

impl fmt::Debug for ConditionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::test_support::{calls, Counted};
    use crate::condition::PropertyCondition;
    use crate::context::ApplicationContext;

    fn group(op: GroupOperator, results: &[bool]) -> ConditionGroup {
        let members = results
            .iter()
            .map(|r| Box::new(Counted::new(*r).0) as Box<dyn Condition>)
            .collect();
        ConditionGroup::new(op, members).unwrap()
    }

    #[test]
    fn test_group_truth_tables() {
        let ctx = ApplicationContext::default();
        let cases = [
            (GroupOperator::Any, [false, false], false),
            (GroupOperator::Any, [true, false], true),
            (GroupOperator::All, [true, true], true),
            (GroupOperator::All, [true, false], false),
            (GroupOperator::None, [false, false], true),
            (GroupOperator::None, [true, false], false),
            (GroupOperator::None, [false, true], false),
        ];

        for (op, results, expected) in cases {
            assert_eq!(group(op, &results).matches(&ctx).unwrap(), expected, "{} {:?}", op, results);
        }
    }

    #[test]
    fn test_empty_group_rejected_for_every_operator() {
        for op in [GroupOperator::Any, GroupOperator::All, GroupOperator::None] {
            assert!(matches!(ConditionGroup::new(op, vec![]), Err(RuntimeError::EmptyGroup)));
        }
    }

    #[test]
    fn test_none_stops_at_first_match() {
        let (first, first_calls) = Counted::new(true);
        let (second, second_calls) = Counted::new(false);
        let group = ConditionGroup::none(vec![Box::new(first), Box::new(second)]).unwrap();

        assert!(!group.matches(&ApplicationContext::default()).unwrap());
        assert_eq!(calls(&first_calls), 1);
        assert_eq!(calls(&second_calls), 0);
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!("any".parse::<GroupOperator>().unwrap(), GroupOperator::Any);
        assert_eq!("ALL".parse::<GroupOperator>().unwrap(), GroupOperator::All);
        assert_eq!("none".parse::<GroupOperator>().unwrap(), GroupOperator::None);
        assert!(matches!(
            "xor".parse::<GroupOperator>(),
            Err(RuntimeError::UnknownOperator(op)) if op == "xor"
        ));

        let members: Vec<Box<dyn Condition>> = vec![Box::new(PropertyCondition::new("a"))];
        assert!(matches!(
            ConditionGroup::parse("most", members),
            Err(RuntimeError::UnknownOperator(_))
        ));
    }
}
