//! Profile condition

use super::Condition;
use crate::context::ConditionContext;
use crate::error::Result;

/// Matches the active profile exactly; an empty profile matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileCondition {
    profile: String,
}

impl ProfileCondition {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }
}

impl Condition for ProfileCondition {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        Ok(self.profile.is_empty() || self.profile == ctx.active_profile())
    }

    fn describe(&self) -> String {
        format!("ProfileCondition({})", self.profile)
    }
}
