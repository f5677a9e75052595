//! Configuration types for FormEvaluator

use crate::error::{Result, SdkError};
use paramgate_core::UnknownOperatorPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main evaluator configuration
///
/// ```yaml
/// definition_files:
///   - forms/release.yaml
/// strict_operators: false
/// materialize_hidden: false
/// trace: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Definition file path(s)
    pub definition_files: Vec<PathBuf>,

    /// Definition contents (id, content) - alternative to file paths
    #[serde(skip)]
    pub definition_contents: Vec<(String, String)>,

    /// Reject unset and unrecognized operators instead of failing open
    pub strict_operators: bool,

    /// Also build values for hidden parameters
    pub materialize_hidden: bool,

    /// Record the evaluated conditions of every gate
    pub trace: bool,
}

impl EvaluatorConfig {
    /// Create a new evaluator configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    /// Add a definition file
    pub fn with_definition_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.definition_files.push(path.into());
        self
    }

    pub fn strict_operators(mut self, enable: bool) -> Self {
        self.strict_operators = enable;
        self
    }

    pub fn materialize_hidden(mut self, enable: bool) -> Self {
        self.materialize_hidden = enable;
        self
    }

    pub fn enable_trace(mut self, enable: bool) -> Self {
        self.trace = enable;
        self
    }

    /// Operator policy handed to the core evaluator
    pub fn unknown_operator_policy(&self) -> UnknownOperatorPolicy {
        if self.strict_operators {
            UnknownOperatorPolicy::Reject
        } else {
            UnknownOperatorPolicy::FailOpen
        }
    }
}
