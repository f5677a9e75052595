//! Configuration-time validation
//!
//! Form-field checks run while a gate is being configured. The evaluator
//! does not depend on them: a configuration that skips these checks still
//! evaluates, degrading to fail-open where fields are missing.

use crate::descriptor::GateKind;
use paramgate_core::{ConditionOperator, ConditionVariant, Operator, ParameterGate};
use regex::Regex;
use thiserror::Error;

/// Validation error for a single configuration field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Condition must not be empty")]
    EmptyCondition,

    #[error("Invalid condition type")]
    InvalidConditionType(String),

    #[error("Control parameter must not be empty")]
    EmptyControlParameter,

    #[error("Control value must not be empty")]
    EmptyControlValue,

    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),

    #[error("You must select a parameter to wrap")]
    MissingWrappedParameter,
}

/// A validation error located within a gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateIssue {
    /// Index of the offending condition, `None` for gate-level issues
    pub condition_index: Option<usize>,
    pub error: ValidationError,
}

/// Check the operator token of a condition
pub fn check_operator(
    token: Option<&str>,
    variant: ConditionVariant,
) -> Result<(), ValidationError> {
    let token = match token {
        None | Some("") => return Err(ValidationError::EmptyCondition),
        Some(token) => token,
    };

    match Operator::parse(token) {
        Some(op) if op.requires_multi_condition() && variant == ConditionVariant::Single => {
            Err(ValidationError::InvalidConditionType(token.to_string()))
        }
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidConditionType(token.to_string())),
    }
}

/// Check the control parameter name
pub fn check_control_parameter(name: Option<&str>) -> Result<(), ValidationError> {
    match name {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(ValidationError::EmptyControlParameter),
    }
}

/// Check the control value, compiling it when the operator is `regex`
pub fn check_control_value(
    value: Option<&str>,
    operator: Option<&str>,
) -> Result<(), ValidationError> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ValidationError::EmptyControlValue),
    };

    if operator == Some(Operator::Regex.as_str()) {
        Regex::new(value).map_err(|e| ValidationError::InvalidRegex(e.to_string()))?;
    }

    Ok(())
}

/// Check that a wrapper gate has an inner parameter
pub fn check_wrapped_parameter(gate: &ParameterGate) -> Result<(), ValidationError> {
    match gate.inner() {
        Some(_) => Ok(()),
        None => Err(ValidationError::MissingWrappedParameter),
    }
}

/// Run every field check on a configured gate and collect all issues
pub fn validate_gate(gate: &ParameterGate, kind: GateKind) -> Result<(), Vec<GateIssue>> {
    let mut issues = Vec::new();

    if kind.requires_wrapped_parameter() {
        if let Err(error) = check_wrapped_parameter(gate) {
            issues.push(GateIssue {
                condition_index: None,
                error,
            });
        }
    }

    let variant = kind.variant();
    for (index, condition) in gate.rule().conditions().iter().enumerate() {
        let token = operator_token(condition.operator());
        let checks = [
            check_operator(token, variant),
            check_control_parameter(condition.control_parameter()),
            // The single-condition editors never validated the control value
            if variant == ConditionVariant::Multi {
                check_control_value(condition.control_value(), token)
            } else {
                Ok(())
            },
        ];

        issues.extend(checks.into_iter().filter_map(Result::err).map(|error| GateIssue {
            condition_index: Some(index),
            error,
        }));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        log::debug!("gate '{}' has {} validation issue(s)", gate.name(), issues.len());
        Err(issues)
    }
}

fn operator_token(operator: &ConditionOperator) -> Option<&str> {
    match operator {
        ConditionOperator::Unset => None,
        ConditionOperator::Known(op) => Some(op.as_str()),
        ConditionOperator::Unrecognized(token) => Some(token.as_str()),
    }
}
