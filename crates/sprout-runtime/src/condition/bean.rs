//! Bean-based conditions

use super::Condition;
use crate::context::{BeanSelector, ConditionContext};
use crate::error::Result;

/// Matches when the context resolves a bean for the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanCondition {
    selector: BeanSelector,
}

impl BeanCondition {
    pub fn new(selector: impl Into<BeanSelector>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    pub fn selector(&self) -> &BeanSelector {
        &self.selector
    }
}

impl Condition for BeanCondition {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        Ok(ctx.find_bean(&self.selector).is_some())
    }

    fn describe(&self) -> String {
        format!("BeanCondition({})", self.selector)
    }
}

/// Matches when the context resolves no bean for the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingBeanCondition {
    selector: BeanSelector,
}

impl MissingBeanCondition {
    pub fn new(selector: impl Into<BeanSelector>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    pub fn selector(&self) -> &BeanSelector {
        &self.selector
    }
}

impl Condition for MissingBeanCondition {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        Ok(ctx.find_bean(&self.selector).is_none())
    }

    fn describe(&self) -> String {
        format!("MissingBeanCondition({})", self.selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ApplicationContext;

    struct Cache;
    struct Mailer;

    #[test]
    fn test_present_and_absent_are_complements() {
        let ctx = ApplicationContext::builder()
            .with_bean("cache", Cache)
            .with_bean("primaryMailer", Mailer)
            .with_bean("backupMailer", Mailer)
            .build();

        let selectors = vec![
            BeanSelector::name("cache"),
            BeanSelector::name("legacyCache"),
            BeanSelector::of_type::<Cache>(),
            BeanSelector::of_type::<Mailer>(),
            BeanSelector::of_type::<Mailer>().named("backupMailer"),
            BeanSelector::default(),
        ];

        for selector in selectors {
            let present = BeanCondition::new(selector.clone()).matches(&ctx).unwrap();
            let absent = MissingBeanCondition::new(selector.clone()).matches(&ctx).unwrap();
            assert_ne!(present, absent, "selector '{}'", selector);
        }
    }

    #[test]
    fn test_bean_by_name_and_type() {
        let ctx = ApplicationContext::builder()
            .with_bean("cache", Cache)
            .with_bean("primaryMailer", Mailer)
            .with_bean("backupMailer", Mailer)
            .build();

        assert!(BeanCondition::new("cache").matches(&ctx).unwrap());
        assert!(BeanCondition::new(BeanSelector::of_type::<Cache>()).matches(&ctx).unwrap());
        // ambiguous type selector resolves nothing
        assert!(!BeanCondition::new(BeanSelector::of_type::<Mailer>()).matches(&ctx).unwrap());
        assert!(MissingBeanCondition::new("legacyCache").matches(&ctx).unwrap());
    }
}
