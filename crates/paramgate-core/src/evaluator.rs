//! Condition evaluation
//!
//! Evaluation is pure: the same conditions against the same lookup always
//! produce the same result, and nothing is cached between calls.
//!
//! Incomplete configuration fails open (the parameter stays visible), while a
//! control parameter missing from the request makes its condition fail.

use crate::condition::{Combinator, Condition, ConditionOperator, ConditionSet, Operator};
use crate::error::{EvalError, Result};
use crate::lookup::ValueLookup;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which gate shape a condition belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionVariant {
    /// Single-condition gates: five operators, no `regex`
    Single,
    /// Multi-condition gates: all six operators
    #[default]
    Multi,
}

/// What to do with an unset or unrecognized operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOperatorPolicy {
    /// Treat the condition as satisfied
    #[default]
    FailOpen,
    /// Return [`EvalError::UnknownOperator`]
    Reject,
}

/// Evaluation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluationOptions {
    pub variant: ConditionVariant,
    pub unknown_operator: UnknownOperatorPolicy,
}

impl EvaluationOptions {
    pub fn single_condition() -> Self {
        Self {
            variant: ConditionVariant::Single,
            ..Self::default()
        }
    }

    pub fn multi_condition() -> Self {
        Self {
            variant: ConditionVariant::Multi,
            ..Self::default()
        }
    }

    pub fn with_unknown_operator(mut self, policy: UnknownOperatorPolicy) -> Self {
        self.unknown_operator = policy;
        self
    }
}

/// Record of one evaluated condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionTrace {
    /// Rendered condition, e.g. `env equals "prod"`
    pub condition: String,
    pub result: bool,
}

impl ConditionTrace {
    pub fn new(condition: impl Into<String>, result: bool) -> Self {
        Self {
            condition: condition.into(),
            result,
        }
    }
}

/// Evaluates conditions and condition sets against submitted values
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    options: EvaluationOptions,
}

impl Evaluator {
    pub fn new(options: EvaluationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EvaluationOptions {
        self.options
    }

    /// Evaluate a single condition
    pub fn evaluate_condition<L>(&self, condition: &Condition, lookup: &L) -> Result<bool>
    where
        L: ValueLookup + ?Sized,
    {
        if !condition.is_restricting() {
            log::debug!("condition '{}' is incomplete, not restricting", condition);
            return Ok(true);
        }

        // Multi-condition gates treat a missing operator like any other missing field
        if self.options.variant == ConditionVariant::Multi && condition.operator().is_unset() {
            log::debug!("condition '{}' has no operator, not restricting", condition);
            return Ok(true);
        }

        let (Some(control_parameter), Some(control_value)) =
            (condition.control_parameter(), condition.control_value())
        else {
            return Ok(true);
        };

        let Some(value) = lookup.first(control_parameter) else {
            log::debug!("no value submitted for '{}'", control_parameter);
            return Ok(false);
        };

        let Some(operator) = self.resolve_operator(condition.operator())? else {
            return Ok(true);
        };

        let result = match operator {
            Operator::Equals => value == control_value,
            Operator::NotEquals => value != control_value,
            Operator::Contains => value.contains(control_value),
            Operator::StartsWith => value.starts_with(control_value),
            Operator::EndsWith => value.ends_with(control_value),
            Operator::Regex => full_match(control_value, value)?,
        };

        log::debug!("condition '{}' against '{}' => {}", condition, value, result);
        Ok(result)
    }

    /// Evaluate a condition set, short-circuiting on the first decisive result
    pub fn evaluate_set<L>(&self, set: &ConditionSet, lookup: &L) -> Result<bool>
    where
        L: ValueLookup + ?Sized,
    {
        self.fold(set, lookup, |_, _| {})
    }

    /// Evaluate a condition set and record every condition that was evaluated.
    ///
    /// Conditions skipped by short-circuiting do not appear in the trace.
    pub fn evaluate_set_with_trace<L>(
        &self,
        set: &ConditionSet,
        lookup: &L,
    ) -> Result<(bool, Vec<ConditionTrace>)>
    where
        L: ValueLookup + ?Sized,
    {
        let mut traces = Vec::with_capacity(set.len());
        let result = self.fold(set, lookup, |condition, result| {
            traces.push(ConditionTrace::new(condition.to_string(), result));
        })?;
        Ok((result, traces))
    }

    fn fold<L, F>(&self, set: &ConditionSet, lookup: &L, mut on_evaluated: F) -> Result<bool>
    where
        L: ValueLookup + ?Sized,
        F: FnMut(&Condition, bool),
    {
        if set.is_empty() {
            return Ok(true);
        }

        let combinator = set.combinator();
        let mut result = combinator == Combinator::And;

        for condition in set.conditions() {
            let condition_result = self.evaluate_condition(condition, lookup)?;
            on_evaluated(condition, condition_result);

            match combinator {
                Combinator::And => {
                    result = result && condition_result;
                    if !result {
                        return Ok(false);
                    }
                }
                Combinator::Or => {
                    result = result || condition_result;
                    if result {
                        return Ok(true);
                    }
                }
            }
        }

        Ok(result)
    }

    /// Map the operator slot to an operator available to this variant.
    ///
    /// `Ok(None)` means the condition fails open.
    fn resolve_operator(&self, slot: &ConditionOperator) -> Result<Option<Operator>> {
        let token = match slot {
            ConditionOperator::Known(op)
                if !(op.requires_multi_condition()
                    && self.options.variant == ConditionVariant::Single) =>
            {
                return Ok(Some(*op));
            }
            ConditionOperator::Known(op) => op.as_str().to_string(),
            ConditionOperator::Unrecognized(token) => token.clone(),
            ConditionOperator::Unset => String::new(),
        };

        match self.options.unknown_operator {
            UnknownOperatorPolicy::FailOpen => {
                log::warn!("operator '{}' is not supported here, not restricting", token);
                Ok(None)
            }
            UnknownOperatorPolicy::Reject => Err(EvalError::UnknownOperator(token)),
        }
    }
}

/// Whole-string regex match
fn full_match(pattern: &str, value: &str) -> Result<bool> {
    let anchored = format!("^(?:{})$", pattern);
    let regex = Regex::new(&anchored).map_err(|source| EvalError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(regex.is_match(value))
}

/// Evaluate a condition set with default options
pub fn evaluate<L>(set: &ConditionSet, lookup: &L) -> Result<bool>
where
    L: ValueLookup + ?Sized,
{
    Evaluator::default().evaluate_set(set, lookup)
}

/// Evaluate a single condition with default options
pub fn evaluate_condition<L>(condition: &Condition, lookup: &L) -> Result<bool>
where
    L: ValueLookup + ?Sized,
{
    Evaluator::default().evaluate_condition(condition, lookup)
}
