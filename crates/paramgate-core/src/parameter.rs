//! Parameter definitions and values
//!
//! A gate wraps an inner [`ParameterDefinition`] and hands value
//! construction to it. The concrete kinds here cover the common form
//! widgets; hosts can implement the trait for their own kinds.

use crate::error::GateError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Typed value of a materialized parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    String(String),
    Text(String),
    Boolean(bool),
}

impl TypedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) | TypedValue::Text(s) => Some(s),
            TypedValue::Boolean(_) => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::String(s) | TypedValue::Text(s) => f.write_str(s),
            TypedValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// A parameter value ready to be handed to the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValue {
    pub name: String,
    pub value: TypedValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterValue {
    pub fn new(name: impl Into<String>, value: TypedValue, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description,
        }
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, TypedValue::String(value.into()), None)
    }
}

/// A parameter kind able to build its value from a submission
pub trait ParameterDefinition: fmt::Debug + Send + Sync {
    /// Parameter name
    fn name(&self) -> &str;

    /// Optional description shown next to the field
    fn description(&self) -> Option<&str> {
        None
    }

    /// Build the value from the structured submission for this parameter.
    ///
    /// The submission is a JSON object with a `value` field, or `None` when
    /// the form sent nothing for the parameter.
    fn create_value(&self, submission: Option<&JsonValue>) -> Result<ParameterValue, GateError>;

    /// Build the value from a raw string
    fn create_value_from_str(&self, value: &str) -> Result<ParameterValue, GateError>;
}

/// Extract the submitted `value` field as a string
fn submitted_str(submission: Option<&JsonValue>) -> Option<&str> {
    submission
        .and_then(|s| s.get("value"))
        .and_then(JsonValue::as_str)
}

// =============================================================================
// String / Text
// =============================================================================

/// Single-line string parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringParameter {
    name: String,
    description: Option<String>,
    default_value: String,
}

impl StringParameter {
    pub fn new(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default_value: default_value.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }
}

impl ParameterDefinition for StringParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn create_value(&self, submission: Option<&JsonValue>) -> Result<ParameterValue, GateError> {
        let value = submitted_str(submission)
            .filter(|v| !v.is_empty())
            .unwrap_or(self.default_value.as_str());
        self.create_value_from_str(value)
    }

    fn create_value_from_str(&self, value: &str) -> Result<ParameterValue, GateError> {
        Ok(ParameterValue::new(
            &self.name,
            TypedValue::String(value.to_string()),
            self.description.clone(),
        ))
    }
}

/// Multi-line text parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextParameter {
    name: String,
    description: Option<String>,
    default_value: String,
}

impl TextParameter {
    pub fn new(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default_value: default_value.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ParameterDefinition for TextParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn create_value(&self, submission: Option<&JsonValue>) -> Result<ParameterValue, GateError> {
        let value = submitted_str(submission)
            .filter(|v| !v.is_empty())
            .unwrap_or(self.default_value.as_str());
        self.create_value_from_str(value)
    }

    fn create_value_from_str(&self, value: &str) -> Result<ParameterValue, GateError> {
        Ok(ParameterValue::new(
            &self.name,
            TypedValue::Text(value.to_string()),
            self.description.clone(),
        ))
    }
}

// =============================================================================
// Boolean
// =============================================================================

/// Checkbox parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanParameter {
    name: String,
    description: Option<String>,
    default_value: bool,
}

impl BooleanParameter {
    pub fn new(name: impl Into<String>, default_value: bool) -> Self {
        Self {
            name: name.into(),
            description: None,
            default_value,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn value(&self, value: bool) -> ParameterValue {
        ParameterValue::new(&self.name, TypedValue::Boolean(value), self.description.clone())
    }
}

impl ParameterDefinition for BooleanParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn create_value(&self, submission: Option<&JsonValue>) -> Result<ParameterValue, GateError> {
        match submission.and_then(|s| s.get("value")) {
            None | Some(JsonValue::Null) => Ok(self.value(self.default_value)),
            Some(JsonValue::Bool(b)) => Ok(self.value(*b)),
            Some(JsonValue::String(s)) => self.create_value_from_str(s),
            Some(other) => Err(GateError::InvalidValue {
                parameter: self.name.clone(),
                message: format!("expected a boolean, got {}", other),
            }),
        }
    }

    fn create_value_from_str(&self, value: &str) -> Result<ParameterValue, GateError> {
        if value.eq_ignore_ascii_case("true") {
            Ok(self.value(true))
        } else if value.eq_ignore_ascii_case("false") {
            Ok(self.value(false))
        } else {
            Err(GateError::InvalidValue {
                parameter: self.name.clone(),
                message: format!("expected true or false, got '{}'", value),
            })
        }
    }
}

// =============================================================================
// Choice
// =============================================================================

/// Drop-down parameter restricted to a fixed list of choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceParameter {
    name: String,
    description: Option<String>,
    choices: Vec<String>,
}

impl ChoiceParameter {
    pub fn new(name: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            choices,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

impl ParameterDefinition for ChoiceParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn create_value(&self, submission: Option<&JsonValue>) -> Result<ParameterValue, GateError> {
        match submitted_str(submission) {
            Some(value) => self.create_value_from_str(value),
            None => {
                let first = self.choices.first().ok_or_else(|| GateError::InvalidValue {
                    parameter: self.name.clone(),
                    message: "no choices configured".to_string(),
                })?;
                self.create_value_from_str(first)
            }
        }
    }

    fn create_value_from_str(&self, value: &str) -> Result<ParameterValue, GateError> {
        if !self.choices.iter().any(|c| c == value) {
            return Err(GateError::InvalidValue {
                parameter: self.name.clone(),
                message: format!("'{}' is not one of {:?}", value, self.choices),
            });
        }
        Ok(ParameterValue::new(
            &self.name,
            TypedValue::String(value.to_string()),
            self.description.clone(),
        ))
    }
}
