//! Builder pattern for FormEvaluator

use crate::config::EvaluatorConfig;
use crate::error::{Result, SdkError};
use crate::form_evaluator::FormEvaluator;
use paramgate_core::ParameterGate;
use paramgate_parser::{validate_gate, GateDocument, GateParser};
use std::collections::HashSet;
use std::path::PathBuf;

/// Builder for FormEvaluator
///
/// Gates are evaluated in the order they are loaded: definition files first,
/// then definition contents, then gates added with [`add_gate`].
///
/// [`add_gate`]: FormEvaluatorBuilder::add_gate
///
/// # Example
///
/// ```rust
/// use paramgate_sdk::{FormEvaluatorBuilder, RequestValues};
///
/// let form = FormEvaluatorBuilder::new()
///     .add_definition_content(
///         "release",
///         r#"
/// parameters:
///   - kind: smartParameter
///     name: HOTFIX_ID
///     defaultValue: none
///     controlParameter: type
///     condition: equals
///     controlValue: hotfix
/// "#,
///     )
///     .build()
///     .unwrap();
///
/// let values = RequestValues::new().with("type", "hotfix");
/// assert!(form.is_visible("HOTFIX_ID", &values).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct FormEvaluatorBuilder {
    config: EvaluatorConfig,
    gates: Vec<ParameterGate>,
}

impl FormEvaluatorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration, keeping gates added so far
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a gate built in code
    pub fn add_gate(mut self, gate: ParameterGate) -> Self {
        self.gates.push(gate);
        self
    }

    /// Add a definition file
    pub fn add_definition_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.definition_files.push(path.into());
        self
    }

    /// Add definition content directly (alternative to file path)
    ///
    /// # Arguments
    /// * `id` - Identifier used in log messages and errors
    /// * `content` - YAML content of the definitions
    pub fn add_definition_content(
        mut self,
        id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.config
            .definition_contents
            .push((id.into(), content.into()));
        self
    }

    /// Reject unset and unrecognized operators
    pub fn strict_operators(mut self, enable: bool) -> Self {
        self.config.strict_operators = enable;
        self
    }

    /// Build values for hidden parameters too
    pub fn materialize_hidden(mut self, enable: bool) -> Self {
        self.config.materialize_hidden = enable;
        self
    }

    /// Enable condition tracing
    pub fn enable_trace(mut self, enable: bool) -> Self {
        self.config.trace = enable;
        self
    }

    /// Build the evaluator
    pub fn build(self) -> Result<FormEvaluator> {
        let mut gates = Vec::new();

        for path in &self.config.definition_files {
            let content = std::fs::read_to_string(path)?;
            let id = path.display().to_string();
            gates.extend(Self::load(&id, &content)?);
        }

        for (id, content) in &self.config.definition_contents {
            gates.extend(Self::load(id, content)?);
        }

        gates.extend(self.gates);

        let mut seen = HashSet::new();
        if let Some(duplicate) = gates.iter().find(|g| !seen.insert(g.name())) {
            return Err(SdkError::ConfigError(format!(
                "Duplicate parameter name: {}",
                duplicate.name()
            )));
        }

        tracing::info!("FormEvaluator built with {} gate(s)", gates.len());
        Ok(FormEvaluator::new(gates, self.config))
    }

    fn load(id: &str, content: &str) -> Result<Vec<ParameterGate>> {
        let document: GateDocument = GateParser::parse(content).map_err(|e| {
            tracing::error!("Failed to parse definitions '{}': {}", id, e);
            SdkError::InvalidDefinitionFile(format!("{}: {}", id, e))
        })?;

        for warning in &document.warnings {
            tracing::warn!("{}: {}", id, warning);
        }

        Ok(document
            .definitions
            .into_iter()
            .map(|definition| {
                if let Err(issues) = validate_gate(&definition.gate, definition.kind) {
                    for issue in issues {
                        tracing::warn!(
                            "{}: {} '{}' condition {:?}: {}",
                            id,
                            definition.kind,
                            definition.gate.name(),
                            issue.condition_index,
                            issue.error
                        );
                    }
                }
                definition.gate
            })
            .collect())
    }
}
