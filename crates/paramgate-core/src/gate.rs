//! Parameter gates
//!
//! A [`ParameterGate`] decides whether its parameter is active for a request
//! and delegates value construction to an optional inner definition.
//! Visibility and value construction are independent: the gate never refuses
//! to build a value because it is inactive, that choice belongs to the caller.

use crate::condition::{Condition, ConditionSet};
use crate::error::{GateError, Result};
use crate::evaluator::{ConditionTrace, EvaluationOptions, Evaluator, UnknownOperatorPolicy};
use crate::lookup::ValueLookup;
use crate::parameter::{ParameterDefinition, ParameterValue, TypedValue};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// The visibility rule held by a gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateRule {
    /// Legacy single condition (no regex)
    Single(Condition),
    /// Multiple conditions joined by a combinator
    Set(ConditionSet),
}

impl Default for GateRule {
    fn default() -> Self {
        GateRule::Set(ConditionSet::default())
    }
}

impl GateRule {
    fn options(&self, policy: UnknownOperatorPolicy) -> EvaluationOptions {
        let options = match self {
            GateRule::Single(_) => EvaluationOptions::single_condition(),
            GateRule::Set(_) => EvaluationOptions::multi_condition(),
        };
        options.with_unknown_operator(policy)
    }

    /// All conditions of the rule, in evaluation order
    pub fn conditions(&self) -> &[Condition] {
        match self {
            GateRule::Single(condition) => std::slice::from_ref(condition),
            GateRule::Set(set) => set.conditions(),
        }
    }
}

/// A form parameter whose visibility depends on other parameters
#[derive(Debug, Clone)]
pub struct ParameterGate {
    name: String,
    description: Option<String>,
    default_value: Option<String>,
    rule: GateRule,
    inner: Option<Arc<dyn ParameterDefinition>>,
    use_submitted_value: bool,
}

impl ParameterGate {
    pub fn builder(name: impl Into<String>) -> GateBuilder {
        GateBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn rule(&self) -> &GateRule {
        &self.rule
    }

    pub fn inner(&self) -> Option<&Arc<dyn ParameterDefinition>> {
        self.inner.as_ref()
    }

    /// Whether the parameter is active for the submitted values
    pub fn is_active<L>(&self, lookup: &L) -> Result<bool>
    where
        L: ValueLookup + ?Sized,
    {
        self.is_active_with(lookup, UnknownOperatorPolicy::FailOpen)
    }

    /// [`ParameterGate::is_active`] with an explicit unknown-operator policy
    pub fn is_active_with<L>(&self, lookup: &L, policy: UnknownOperatorPolicy) -> Result<bool>
    where
        L: ValueLookup + ?Sized,
    {
        let evaluator = Evaluator::new(self.rule.options(policy));
        let active = match &self.rule {
            GateRule::Single(condition) => evaluator.evaluate_condition(condition, lookup)?,
            GateRule::Set(set) => evaluator.evaluate_set(set, lookup)?,
        };
        log::debug!("gate '{}' active={}", self.name, active);
        Ok(active)
    }

    /// Evaluate activity and return the evaluated conditions
    pub fn is_active_with_trace<L>(
        &self,
        lookup: &L,
        policy: UnknownOperatorPolicy,
    ) -> Result<(bool, Vec<ConditionTrace>)>
    where
        L: ValueLookup + ?Sized,
    {
        let evaluator = Evaluator::new(self.rule.options(policy));
        match &self.rule {
            GateRule::Single(condition) => {
                let result = evaluator.evaluate_condition(condition, lookup)?;
                Ok((result, vec![ConditionTrace::new(condition.to_string(), result)]))
            }
            GateRule::Set(set) => evaluator.evaluate_set_with_trace(set, lookup),
        }
    }

    /// Whether a submitted value overrides the gate's own default
    pub fn uses_submitted_value(&self) -> bool {
        self.use_submitted_value
    }

    /// Build the parameter value from a structured submission.
    ///
    /// Delegates to the inner definition when present. Without one, the gate
    /// builds its value from its own default, `None` when there is no default.
    /// A gate using submitted values takes a non-empty submitted `value`
    /// instead, and an absent submission yields the default as text.
    pub fn create_value(
        &self,
        submission: Option<&JsonValue>,
    ) -> std::result::Result<Option<ParameterValue>, GateError> {
        if let Some(inner) = &self.inner {
            return inner.create_value(submission).map(Some);
        }

        let value = match submission {
            Some(submission) if self.use_submitted_value => submission
                .get("value")
                .and_then(JsonValue::as_str)
                .filter(|v| !v.is_empty())
                .or(self.default_value.as_deref())
                .map(|v| TypedValue::String(v.to_string())),
            None if self.use_submitted_value => {
                self.default_value.clone().map(TypedValue::Text)
            }
            _ => self.default_value.clone().map(TypedValue::String),
        };

        Ok(value.map(|value| ParameterValue::new(&self.name, value, self.description.clone())))
    }

    /// Build the parameter value from a raw string
    pub fn create_value_from_str(
        &self,
        value: &str,
    ) -> std::result::Result<ParameterValue, GateError> {
        if let Some(inner) = &self.inner {
            return inner.create_value_from_str(value);
        }

        let value = if self.use_submitted_value {
            TypedValue::Text(value.to_string())
        } else {
            TypedValue::String(value.to_string())
        };
        Ok(ParameterValue::new(&self.name, value, self.description.clone()))
    }
}

/// Builder for [`ParameterGate`]
///
/// # Example
///
/// ```rust
/// use paramgate_core::{Condition, ConditionSet, Operator, ParameterGate, RequestValues};
///
/// let gate = ParameterGate::builder("DEPLOY_TARGET")
///     .conditions(ConditionSet::all(vec![
///         Condition::new("branch", Operator::StartsWith, "release-"),
///         Condition::new("env", Operator::Equals, "prod"),
///     ]))
///     .build();
///
/// let values = RequestValues::new()
///     .with("branch", "release-2.3")
///     .with("env", "prod");
/// assert!(gate.is_active(&values).unwrap());
/// ```
#[derive(Debug)]
pub struct GateBuilder {
    name: String,
    description: Option<String>,
    default_value: Option<String>,
    rule: GateRule,
    inner: Option<Arc<dyn ParameterDefinition>>,
    use_submitted_value: bool,
}

impl GateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default_value: None,
            rule: GateRule::default(),
            inner: None,
            use_submitted_value: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Gate on a single legacy condition
    pub fn condition(mut self, condition: Condition) -> Self {
        self.rule = GateRule::Single(condition);
        self
    }

    /// Gate on a condition set
    pub fn conditions(mut self, set: ConditionSet) -> Self {
        self.rule = GateRule::Set(set);
        self
    }

    pub fn rule(mut self, rule: GateRule) -> Self {
        self.rule = rule;
        self
    }

    /// Wrap a shared inner parameter definition
    pub fn inner(mut self, inner: Arc<dyn ParameterDefinition>) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Wrap an owned inner parameter definition
    pub fn wrap<P>(self, inner: P) -> Self
    where
        P: ParameterDefinition + 'static,
    {
        self.inner(Arc::new(inner))
    }

    /// Let a non-empty submitted value replace the default when the gate
    /// has no inner parameter
    pub fn use_submitted_value(mut self, enable: bool) -> Self {
        self.use_submitted_value = enable;
        self
    }

    pub fn build(self) -> ParameterGate {
        ParameterGate {
            name: self.name,
            description: self.description,
            default_value: self.default_value,
            rule: self.rule,
            inner: self.inner,
            use_submitted_value: self.use_submitted_value,
        }
    }
}
