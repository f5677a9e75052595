//! Outcome types for FormEvaluator

use paramgate_core::{ConditionTrace, ParameterValue};
use serde::{Deserialize, Serialize};

/// Visibility of one gated parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
    /// Evaluation failed; the reason is the rendered error.
    Undetermined(String),
}

impl Visibility {
    pub fn from_active(active: bool) -> Self {
        if active {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Visibility::Hidden)
    }

    pub fn is_undetermined(&self) -> bool {
        matches!(self, Visibility::Undetermined(_))
    }
}

/// Result for a single gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateOutcome {
    pub name: String,
    pub visibility: Visibility,

    /// Materialized parameter value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ParameterValue>,

    /// Set when the submitted value was rejected by the parameter kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_error: Option<String>,

    /// Evaluated conditions, only filled when tracing is enabled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<ConditionTrace>,
}

/// Result for a whole form, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormOutcome {
    pub gates: Vec<GateOutcome>,
}

impl FormOutcome {
    pub fn get(&self, name: &str) -> Option<&GateOutcome> {
        self.gates.iter().find(|g| g.name == name)
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.gates
            .iter()
            .filter(|g| g.visibility.is_visible())
            .map(|g| g.name.as_str())
            .collect()
    }

    pub fn undetermined(&self) -> impl Iterator<Item = &GateOutcome> {
        self.gates.iter().filter(|g| g.visibility.is_undetermined())
    }

    /// Every materialized value, in declaration order
    pub fn values(&self) -> Vec<&ParameterValue> {
        self.gates.iter().filter_map(|g| g.value.as_ref()).collect()
    }
}
