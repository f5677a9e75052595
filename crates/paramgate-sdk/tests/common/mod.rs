//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use paramgate_sdk::{
    EvaluatorConfig, FormEvaluator, FormEvaluatorBuilder, FormOutcome, GateOutcome, TypedValue,
    Visibility,
};
use std::io::Write;

/// Test helper to create a FormEvaluator from inline YAML definitions
pub struct TestForm {
    contents: Vec<String>,
    config: EvaluatorConfig,
}

impl TestForm {
    pub fn new() -> Self {
        Self {
            contents: Vec::new(),
            config: EvaluatorConfig::default(),
        }
    }

    /// Add a definition document
    pub fn with_definitions(mut self, yaml: &str) -> Self {
        self.contents.push(yaml.trim().to_string());
        self
    }

    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Build from inline contents
    pub fn build(&self) -> FormEvaluator {
        self.contents
            .iter()
            .enumerate()
            .fold(
                FormEvaluatorBuilder::new().with_config(self.config.clone()),
                |builder, (index, content)| {
                    builder.add_definition_content(format!("test_{}", index), content.as_str())
                },
            )
            .build()
            .expect("Failed to build form evaluator")
    }

    /// Build through a temporary definition file
    pub fn build_from_file(&self) -> FormEvaluator {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(self.contents.join("\n").as_bytes())
            .expect("Failed to write temp file");

        FormEvaluatorBuilder::new()
            .with_config(self.config.clone())
            .add_definition_file(file.path())
            .build()
            .expect("Failed to build form evaluator")
    }
}

/// Helper to create request values from name-value pairs
#[macro_export]
macro_rules! request {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let mut values = paramgate_sdk::RequestValues::new();
        $(
            values.append($name, $value);
        )*
        values
    }};
}

/// Assertion helpers for FormOutcome
pub trait OutcomeAssertions {
    fn gate_outcome(&self, name: &str) -> &GateOutcome;
    fn assert_visible(&self, name: &str);
    fn assert_hidden(&self, name: &str);
    fn assert_undetermined(&self, name: &str);
    fn assert_value(&self, name: &str, expected: TypedValue);
}

impl OutcomeAssertions for FormOutcome {
    fn gate_outcome(&self, name: &str) -> &GateOutcome {
        self.get(name)
            .unwrap_or_else(|| panic!("No outcome for parameter '{}'", name))
    }

    fn assert_visible(&self, name: &str) {
        assert_eq!(
            self.gate_outcome(name).visibility,
            Visibility::Visible,
            "Expected '{}' to be visible",
            name
        );
    }

    fn assert_hidden(&self, name: &str) {
        assert_eq!(
            self.gate_outcome(name).visibility,
            Visibility::Hidden,
            "Expected '{}' to be hidden",
            name
        );
    }

    fn assert_undetermined(&self, name: &str) {
        assert!(
            self.gate_outcome(name).visibility.is_undetermined(),
            "Expected '{}' to be undetermined, got {:?}",
            name,
            self.gate_outcome(name).visibility
        );
    }

    fn assert_value(&self, name: &str, expected: TypedValue) {
        let value = self
            .gate_outcome(name)
            .value
            .as_ref()
            .unwrap_or_else(|| panic!("No value for parameter '{}'", name));
        assert_eq!(value.value, expected, "Unexpected value for '{}'", name);
    }
}
