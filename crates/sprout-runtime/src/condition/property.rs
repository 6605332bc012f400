//! Property-based conditions

use super::Condition;
use crate::context::ConditionContext;
use crate::engine;
use crate::error::{Result, RuntimeError};
use sprout_core::Value;

/// Placeholder replaced by the actual property value in templated expectations
pub const TEMPLATE_MARKER: char = '$';

/// Matches when at least one property exists under the prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyCondition {
    name: String,
}

impl PropertyCondition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Condition for PropertyCondition {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        Ok(!ctx.properties_with_prefix(&self.name).is_empty())
    }

    fn describe(&self) -> String {
        format!("PropertyCondition({})", self.name)
    }
}

/// Matches when no property exists under the prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPropertyCondition {
    name: String,
}

impl MissingPropertyCondition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Condition for MissingPropertyCondition {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        Ok(ctx.properties_with_prefix(&self.name).is_empty())
    }

    fn describe(&self) -> String {
        format!("MissingPropertyCondition({})", self.name)
    }
}

/// Matches when a property has the expected value
///
/// The expected value is compared in one of three ways:
/// - non-string values use `Value` equality, so `Int(8)` never equals `Float(8.0)`
/// - plain strings must equal a string property
/// - strings containing `$` are templates: every `$` is replaced by the
///   property's text and the result is evaluated (`"$>=4"` becomes `"8>=4"`)
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValueCondition {
    name: String,
    expected: Value,
    match_if_missing: bool,
}

impl PropertyValueCondition {
    pub fn new(name: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            expected: expected.into(),
            match_if_missing: false,
        }
    }

    /// Result to report when the property is not set (default `false`)
    pub fn match_if_missing(mut self, matches: bool) -> Self {
        self.match_if_missing = matches;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }

    fn evaluate_template(&self, template: &str, actual: &Value) -> Result<bool> {
        let expression = template.replace(TEMPLATE_MARKER, &actual.to_string());
        tracing::trace!("property '{}': evaluating '{}'", self.name, expression);

        match engine::evaluate_str(&expression) {
            Ok(result) => Ok(matches!(result, Value::Bool(true))),
            Err(err) => Err(RuntimeError::ExpressionEvaluation {
                expression,
                source: Box::new(err),
            }),
        }
    }
}

impl Condition for PropertyValueCondition {
    fn matches(&self, ctx: &dyn ConditionContext) -> Result<bool> {
        let Some(actual) = ctx.property_value(&self.name) else {
            return Ok(self.match_if_missing);
        };

        match &self.expected {
            Value::String(template) if template.contains(TEMPLATE_MARKER) => {
                self.evaluate_template(template, &actual)
            }
            Value::String(expected) => Ok(actual.as_str() == Some(expected.as_str())),
            expected => Ok(&actual == expected),
        }
    }

    fn describe(&self) -> String {
        format!("PropertyValueCondition({} = {})", self.name, self.expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ApplicationContext;

    fn ctx_with(key: &str, value: impl Into<Value>) -> ApplicationContext {
        ApplicationContext::builder().with_property(key, value).build()
    }

    #[test]
    fn test_present_and_absent_are_complements() {
        let ctx = ApplicationContext::builder()
            .with_property("feature.enabled", true)
            .with_property("web.port", 8080)
            .build();

        for name in ["feature.enabled", "feature", "web", "fea", "missing", ""] {
            let present = PropertyCondition::new(name).matches(&ctx).unwrap();
            let absent = MissingPropertyCondition::new(name).matches(&ctx).unwrap();
            assert_ne!(present, absent, "prefix '{}'", name);
        }
        assert!(PropertyCondition::new("feature.enabled").matches(&ctx).unwrap());
        assert!(!PropertyCondition::new("fea").matches(&ctx).unwrap());
    }

    #[test]
    fn test_literal_value() {
        let ctx = ctx_with("threads", 8);
        assert!(PropertyValueCondition::new("threads", 8).matches(&ctx).unwrap());
        assert!(!PropertyValueCondition::new("threads", 9).matches(&ctx).unwrap());
        // no coercion
        assert!(!PropertyValueCondition::new("threads", 8.0).matches(&ctx).unwrap());
        assert!(!PropertyValueCondition::new("threads", "8").matches(&ctx).unwrap());
    }

    #[test]
    fn test_plain_string_value() {
        let ctx = ctx_with("mode", "cluster");
        assert!(PropertyValueCondition::new("mode", "cluster").matches(&ctx).unwrap());
        assert!(!PropertyValueCondition::new("mode", "single").matches(&ctx).unwrap());
    }

    #[test]
    fn test_template_value() {
        let cond = PropertyValueCondition::new("threads", "$>=4");
        assert!(cond.matches(&ctx_with("threads", 8)).unwrap());
        assert!(!cond.matches(&ctx_with("threads", 2)).unwrap());

        let range = PropertyValueCondition::new("threads", "$ > 4 && $ < 16");
        assert!(range.matches(&ctx_with("threads", 8)).unwrap());
        assert!(!range.matches(&ctx_with("threads", 32)).unwrap());

        let quoted = PropertyValueCondition::new("mode", r#""$" == "cluster""#);
        assert!(quoted.matches(&ctx_with("mode", "cluster")).unwrap());
    }

    #[test]
    fn test_template_non_bool_result_is_false() {
        let cond = PropertyValueCondition::new("threads", "$ + 1");
        assert!(!cond.matches(&ctx_with("threads", 8)).unwrap());
    }

    #[test]
    fn test_template_errors_are_not_false() {
        let err = PropertyValueCondition::new("threads", "$ >")
            .matches(&ctx_with("threads", 8))
            .unwrap_err();
        match err {
            RuntimeError::ExpressionEvaluation { expression, source } => {
                assert_eq!(expression, "8 >");
                assert!(matches!(*source, RuntimeError::Parse(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // bare words are not identifiers in the evaluator
        let err = PropertyValueCondition::new("mode", "$ == 1")
            .matches(&ctx_with("mode", "cluster"))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::ExpressionEvaluation { .. }));
    }

    #[test]
    fn test_deeply_nested_value_is_an_error() {
        let ctx = ctx_with("x", "(".repeat(10_000));
        let err = PropertyValueCondition::new("x", "$ > 1").matches(&ctx).unwrap_err();
        match err {
            RuntimeError::ExpressionEvaluation { source, .. } => {
                assert!(matches!(*source, RuntimeError::Parse(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_template_must_yield_bool_true() {
        // a quoted template yields the string "true", not the boolean
        let quoted = PropertyValueCondition::new("flag", "\"$\"");
        assert!(!quoted.matches(&ctx_with("flag", true)).unwrap());

        let bare = PropertyValueCondition::new("flag", "$");
        assert!(bare.matches(&ctx_with("flag", true)).unwrap());
        assert!(!bare.matches(&ctx_with("flag", false)).unwrap());
    }

    #[test]
    fn test_missing_property() {
        let ctx = ApplicationContext::default();
        let cond = PropertyValueCondition::new("threads", "$>=4");
        assert!(!cond.matches(&ctx).unwrap());
        assert!(cond.match_if_missing(true).matches(&ctx).unwrap());
    }
}
