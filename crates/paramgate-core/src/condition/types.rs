//! Condition and condition set types

use super::operator::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The operator slot of a condition
///
/// Configurations may carry no operator or a token that is not a known
/// operator. Both survive loading and are resolved by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConditionOperator {
    /// No operator configured
    #[default]
    Unset,
    /// A recognized operator
    Known(Operator),
    /// A token that does not name any operator
    Unrecognized(String),
}

impl ConditionOperator {
    /// Resolve an optional configuration token
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            None | Some("") => ConditionOperator::Unset,
            Some(t) => match Operator::parse(t) {
                Some(op) => ConditionOperator::Known(op),
                None => ConditionOperator::Unrecognized(t.to_string()),
            },
        }
    }

    /// The recognized operator, if any
    pub fn known(&self) -> Option<Operator> {
        match self {
            ConditionOperator::Known(op) => Some(*op),
            _ => None,
        }
    }

    /// Returns true if no operator was configured
    pub fn is_unset(&self) -> bool {
        matches!(self, ConditionOperator::Unset)
    }
}

impl From<Operator> for ConditionOperator {
    fn from(op: Operator) -> Self {
        ConditionOperator::Known(op)
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionOperator::Unset => f.write_str("<unset>"),
            ConditionOperator::Known(op) => write!(f, "{}", op),
            ConditionOperator::Unrecognized(token) => write!(f, "{}?", token),
        }
    }
}

/// A single comparison rule against another parameter's submitted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    control_parameter: Option<String>,
    operator: ConditionOperator,
    control_value: Option<String>,
}

impl Condition {
    /// Create a fully specified condition
    pub fn new(
        control_parameter: impl Into<String>,
        operator: Operator,
        control_value: impl Into<String>,
    ) -> Self {
        Self {
            control_parameter: Some(control_parameter.into()),
            operator: ConditionOperator::Known(operator),
            control_value: Some(control_value.into()),
        }
    }

    /// Create a condition from raw configuration fields, any of which may be missing
    pub fn from_parts(
        control_parameter: Option<String>,
        operator: Option<&str>,
        control_value: Option<String>,
    ) -> Self {
        Self {
            control_parameter,
            operator: ConditionOperator::from_token(operator),
            control_value,
        }
    }

    /// Name of the parameter whose value is inspected
    pub fn control_parameter(&self) -> Option<&str> {
        self.control_parameter.as_deref()
    }

    /// Configured operator
    pub fn operator(&self) -> &ConditionOperator {
        &self.operator
    }

    /// Value the submitted value is compared against
    pub fn control_value(&self) -> Option<&str> {
        self.control_value.as_deref()
    }

    /// Returns true if the parameter name and control value are both present.
    ///
    /// An incomplete condition never restricts visibility.
    pub fn is_restricting(&self) -> bool {
        self.control_parameter().is_some_and(|p| !p.is_empty())
            && self.control_value().is_some_and(|v| !v.is_empty())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} \"{}\"",
            self.control_parameter().unwrap_or("<unset>"),
            self.operator,
            self.control_value().unwrap_or("")
        )
    }
}

/// Boolean operator joining the conditions of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Combinator {
    /// Every condition must pass
    #[default]
    #[serde(rename = "AND")]
    And,
    /// At least one condition must pass
    #[serde(rename = "OR")]
    Or,
}

impl Combinator {
    /// Resolve a configuration token.
    ///
    /// Only the exact token `AND` selects conjunction; anything else,
    /// including unknown tokens, evaluates as `OR`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "AND" => Combinator::And,
            "OR" => Combinator::Or,
            other => {
                log::warn!("unrecognized logical operator '{}', evaluating as OR", other);
                Combinator::Or
            }
        }
    }

    /// Configuration token for this combinator
    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered conditions combined into one boolean result
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
    combinator: Combinator,
}

impl ConditionSet {
    /// Create a condition set
    pub fn new(conditions: Vec<Condition>, combinator: Combinator) -> Self {
        Self {
            conditions,
            combinator,
        }
    }

    /// Create an AND set
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::new(conditions, Combinator::And)
    }

    /// Create an OR set
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::new(conditions, Combinator::Or)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }
}
