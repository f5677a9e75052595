//! FormEvaluator - evaluate every gated parameter of a form

mod types;

pub use types::{FormOutcome, GateOutcome, Visibility};

use crate::config::EvaluatorConfig;
use crate::error::{Result, SdkError};
use paramgate_core::{ParameterGate, ParameterValue, UnknownOperatorPolicy, ValueLookup};
use serde_json::json;

/// Evaluates a fixed set of gates against submitted requests
///
/// Immutable after build; one evaluator can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct FormEvaluator {
    gates: Vec<ParameterGate>,
    config: EvaluatorConfig,
}

impl FormEvaluator {
    pub(crate) fn new(gates: Vec<ParameterGate>, config: EvaluatorConfig) -> Self {
        Self { gates, config }
    }

    pub fn gates(&self) -> &[ParameterGate] {
        &self.gates
    }

    pub fn gate(&self, name: &str) -> Option<&ParameterGate> {
        self.gates.iter().find(|g| g.name() == name)
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate all gates, in declaration order
    ///
    /// A gate whose conditions cannot be evaluated is reported as
    /// [`Visibility::Undetermined`]; the other gates are unaffected.
    pub fn evaluate<L>(&self, lookup: &L) -> FormOutcome
    where
        L: ValueLookup + ?Sized,
    {
        let policy = self.config.unknown_operator_policy();
        let gates = self
            .gates
            .iter()
            .map(|gate| self.evaluate_gate(gate, lookup, policy))
            .collect();

        FormOutcome { gates }
    }

    /// Whether the named parameter is visible for the submitted values
    pub fn is_visible<L>(&self, name: &str, lookup: &L) -> Result<bool>
    where
        L: ValueLookup + ?Sized,
    {
        let gate = self
            .gate(name)
            .ok_or_else(|| SdkError::UnknownParameter(name.to_string()))?;
        Ok(gate.is_active_with(lookup, self.config.unknown_operator_policy())?)
    }

    fn evaluate_gate<L>(
        &self,
        gate: &ParameterGate,
        lookup: &L,
        policy: UnknownOperatorPolicy,
    ) -> GateOutcome
    where
        L: ValueLookup + ?Sized,
    {
        let evaluated = if self.config.trace {
            gate.is_active_with_trace(lookup, policy)
        } else {
            gate.is_active_with(lookup, policy).map(|active| (active, Vec::new()))
        };

        let (visibility, trace) = match evaluated {
            Ok((active, trace)) => (Visibility::from_active(active), trace),
            Err(e) => {
                tracing::warn!("Visibility of '{}' undetermined: {}", gate.name(), e);
                (Visibility::Undetermined(e.to_string()), Vec::new())
            }
        };
        tracing::debug!("gate '{}': {:?}", gate.name(), visibility);

        let materialize = visibility.is_visible()
            || (visibility.is_hidden() && self.config.materialize_hidden);

        let (value, value_error) = if materialize {
            match Self::materialize(gate, lookup) {
                Ok(value) => (value, None),
                Err(e) => {
                    tracing::warn!("Rejected value for '{}': {}", gate.name(), e);
                    (None, Some(e.to_string()))
                }
            }
        } else {
            (None, None)
        };

        GateOutcome {
            name: gate.name().to_string(),
            visibility,
            value,
            value_error,
            trace,
        }
    }

    /// Build the gate's value from the first submitted value for its name
    fn materialize<L>(gate: &ParameterGate, lookup: &L) -> Result<Option<ParameterValue>>
    where
        L: ValueLookup + ?Sized,
    {
        let submission = lookup
            .first(gate.name())
            .map(|value| json!({ "name": gate.name(), "value": value }));

        Ok(gate.create_value(submission.as_ref())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramgate_core::{Condition, Operator, RequestValues, StringParameter, TypedValue};

    fn evaluator(config: EvaluatorConfig) -> FormEvaluator {
        let gates = vec![
            ParameterGate::builder("HOTFIX_ID")
                .condition(Condition::new("type", Operator::Equals, "hotfix"))
                .default_value("none")
                .build(),
            ParameterGate::builder("TARGET")
                .condition(Condition::from_parts(
                    Some("env".to_string()),
                    Some("approx"),
                    Some("prod".to_string()),
                ))
                .wrap(StringParameter::new("TARGET", "eu-west"))
                .build(),
        ];
        FormEvaluator::new(gates, config)
    }

    #[test]
    fn test_evaluate_materializes_visible_gates() {
        let form = evaluator(EvaluatorConfig::default());
        let values = RequestValues::new()
            .with("type", "hotfix")
            .with("env", "dev")
            .with("TARGET", "us-east");

        let outcome = form.evaluate(&values);
        assert_eq!(outcome.visible_names(), vec!["HOTFIX_ID", "TARGET"]);

        let target = outcome.get("TARGET").unwrap();
        assert_eq!(
            target.value.as_ref().map(|v| &v.value),
            Some(&TypedValue::String("us-east".to_string()))
        );
        assert!(target.trace.is_empty());
    }

    #[test]
    fn test_hidden_gate_has_no_value_by_default() {
        let form = evaluator(EvaluatorConfig::default());
        let values = RequestValues::new().with("type", "feature");

        let hotfix = form.evaluate(&values).get("HOTFIX_ID").cloned().unwrap();
        assert_eq!(hotfix.visibility, Visibility::Hidden);
        assert!(hotfix.value.is_none());

        let form = evaluator(EvaluatorConfig::new().materialize_hidden(true));
        let hotfix = form.evaluate(&values).get("HOTFIX_ID").cloned().unwrap();
        assert_eq!(
            hotfix.value.map(|v| v.value),
            Some(TypedValue::String("none".to_string()))
        );
    }

    #[test]
    fn test_strict_operators_make_gate_undetermined() {
        let values = RequestValues::new().with("env", "prod");

        let lenient = evaluator(EvaluatorConfig::default());
        assert!(lenient.is_visible("TARGET", &values).unwrap());

        let strict = evaluator(EvaluatorConfig::new().strict_operators(true));
        let outcome = strict.evaluate(&values);
        assert!(outcome.get("TARGET").unwrap().visibility.is_undetermined());
        assert!(matches!(
            strict.is_visible("TARGET", &values),
            Err(SdkError::EvalError(_))
        ));
    }

    #[test]
    fn test_is_visible_unknown_parameter() {
        let form = evaluator(EvaluatorConfig::default());
        assert!(matches!(
            form.is_visible("NOPE", &RequestValues::new()),
            Err(SdkError::UnknownParameter(ref n)) if n == "NOPE"
        ));
    }

    #[test]
    fn test_trace_is_recorded_when_enabled() {
        let form = evaluator(EvaluatorConfig::new().enable_trace(true));
        let outcome = form.evaluate(&RequestValues::new().with("type", "hotfix"));

        let trace = &outcome.get("HOTFIX_ID").unwrap().trace;
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].condition, "type equals \"hotfix\"");
        assert!(trace[0].result);
    }
}
