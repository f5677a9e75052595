//! Gate definition parser
//!
//! Parses YAML parameter definitions into [`ParameterGate`] values.
//!
//! ```yaml
//! version: "1.0"
//! parameters:
//!   - kind: multiConditionParameter
//!     name: DEPLOY_TARGET
//!     logicalOperator: AND
//!     conditions:
//!       - controlParameter: branch
//!         condition: startsWith
//!         controlValue: release-
//!     wrappedParameter:
//!       kind: choice
//!       choices: [prod, canary]
//! ```
//!
//! Missing condition fields are not parse errors. They load as incomplete
//! conditions which never restrict visibility.

use crate::descriptor::GateKind;
use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use paramgate_core::{
    BooleanParameter, ChoiceParameter, Combinator, Condition, ConditionSet, GateBuilder,
    ParameterDefinition, ParameterGate, StringParameter, TextParameter,
};
use serde_yaml::Value as YamlValue;
use std::sync::Arc;

const CONDITION_FIELDS: &[&str] = &["controlParameter", "condition", "controlValue"];
const INNER_FIELDS: &[&str] = &["kind", "name", "description", "defaultValue", "choices"];

/// A parsed gate together with the kind it was declared as
#[derive(Debug, Clone)]
pub struct GateDefinition {
    pub kind: GateKind,
    pub gate: ParameterGate,
}

/// A parsed definition file
#[derive(Debug, Clone, Default)]
pub struct GateDocument {
    pub version: Option<String>,
    pub definitions: Vec<GateDefinition>,
    /// Unknown-field warnings collected while parsing
    pub warnings: Vec<String>,
}

impl GateDocument {
    pub fn gates(&self) -> impl Iterator<Item = &ParameterGate> {
        self.definitions.iter().map(|d| &d.gate)
    }
}

/// Gate definition parser
pub struct GateParser;

impl GateParser {
    /// Parse a definition document from YAML string
    pub fn parse(yaml_str: &str) -> Result<GateDocument> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml)
    }

    /// Parse a definition document from YAML value
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<GateDocument> {
        let parameters = YamlParser::get_optional_array(yaml, "parameters").ok_or_else(|| {
            ParseError::MissingField {
                field: "parameters".to_string(),
            }
        })?;

        let mut document = GateDocument {
            version: YamlParser::get_optional_string(yaml, "version"),
            ..GateDocument::default()
        };

        for parameter in parameters {
            let definition = Self::parse_definition(parameter, &mut document.warnings)?;
            document.definitions.push(definition);
        }

        log::debug!(
            "parsed {} gate definition(s), {} warning(s)",
            document.definitions.len(),
            document.warnings.len()
        );
        Ok(document)
    }

    /// Parse a single gate definition
    pub fn parse_definition(obj: &YamlValue, warnings: &mut Vec<String>) -> Result<GateDefinition> {
        let symbol = YamlParser::get_string(obj, "kind")?;
        let kind = GateKind::from_symbol(&symbol).ok_or(ParseError::UnknownKind(symbol))?;

        let name = YamlParser::get_string(obj, "name")?;
        if name.is_empty() {
            return Err(ParseError::InvalidValue {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        warnings.extend(YamlParser::validate_fields(
            obj,
            Self::known_fields(kind),
            &format!("{} '{}'", kind, name),
        ));

        let mut builder = ParameterGate::builder(name.clone());
        if let Some(description) = YamlParser::get_optional_string(obj, "description") {
            builder = builder.description(description);
        }

        builder = match kind {
            GateKind::SmartParameter => Self::with_default(builder, obj)
                .condition(Self::parse_condition(obj))
                .use_submitted_value(true),
            GateKind::ConditionalParameter => {
                let builder = Self::with_default(builder, obj)
                    .condition(Self::parse_condition(obj));
                Self::with_inner(builder, obj, "parameterDefinition", &name, warnings)?
            }
            GateKind::SmartWrapperParameter => {
                let builder = builder.condition(Self::parse_condition(obj));
                Self::with_inner(builder, obj, "wrappedParameter", &name, warnings)?
            }
            GateKind::MultiConditionParameter => {
                let builder = builder.conditions(Self::parse_condition_set(obj, warnings, &name)?);
                Self::with_inner(builder, obj, "wrappedParameter", &name, warnings)?
            }
        };

        Ok(GateDefinition {
            kind,
            gate: builder.build(),
        })
    }

    fn known_fields(kind: GateKind) -> &'static [&'static str] {
        match kind {
            GateKind::SmartParameter => &[
                "kind",
                "name",
                "description",
                "defaultValue",
                "controlParameter",
                "condition",
                "controlValue",
            ],
            GateKind::ConditionalParameter => &[
                "kind",
                "name",
                "description",
                "defaultValue",
                "parameterDefinition",
                "controlParameter",
                "condition",
                "controlValue",
            ],
            GateKind::SmartWrapperParameter => &[
                "kind",
                "name",
                "description",
                "wrappedParameter",
                "refParameter",
                "controlParameter",
                "condition",
                "controlValue",
            ],
            GateKind::MultiConditionParameter => &[
                "kind",
                "name",
                "description",
                "wrappedParameter",
                "refParameter",
                "logicalOperator",
                "conditions",
            ],
        }
    }

    fn with_default(builder: GateBuilder, obj: &YamlValue) -> GateBuilder {
        match YamlParser::get_optional_string(obj, "defaultValue") {
            Some(default_value) => builder.default_value(default_value),
            None => builder,
        }
    }

    fn with_inner(
        builder: GateBuilder,
        obj: &YamlValue,
        field: &str,
        gate_name: &str,
        warnings: &mut Vec<String>,
    ) -> Result<GateBuilder> {
        match obj.get(field) {
            Some(inner) if !inner.is_null() => {
                let inner = Self::parse_inner(inner, gate_name, warnings)?;
                Ok(builder.inner(inner))
            }
            _ => Ok(builder),
        }
    }

    /// Parse the inline condition fields of a single-condition gate
    fn parse_condition(obj: &YamlValue) -> Condition {
        Condition::from_parts(
            YamlParser::get_optional_string(obj, "controlParameter"),
            YamlParser::get_optional_string(obj, "condition").as_deref(),
            YamlParser::get_optional_string(obj, "controlValue"),
        )
    }

    fn parse_condition_set(
        obj: &YamlValue,
        warnings: &mut Vec<String>,
        gate_name: &str,
    ) -> Result<ConditionSet> {
        let combinator = match obj.get("logicalOperator") {
            None | Some(YamlValue::Null) => Combinator::default(),
            Some(YamlValue::String(token)) => Combinator::from_token(token),
            Some(_) => {
                return Err(ParseError::InvalidValue {
                    field: "logicalOperator".to_string(),
                    message: "expected AND or OR".to_string(),
                })
            }
        };

        let conditions = YamlParser::get_optional_array(obj, "conditions")
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        if !item.is_mapping() {
                            return Err(ParseError::InvalidValue {
                                field: format!("conditions[{}]", index),
                                message: "expected a mapping".to_string(),
                            });
                        }
                        warnings.extend(YamlParser::validate_fields(
                            item,
                            CONDITION_FIELDS,
                            &format!("condition {} of '{}'", index, gate_name),
                        ));
                        Ok(Self::parse_condition(item))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(ConditionSet::new(conditions, combinator))
    }

    /// Parse a wrapped parameter definition
    fn parse_inner(
        obj: &YamlValue,
        gate_name: &str,
        warnings: &mut Vec<String>,
    ) -> Result<Arc<dyn ParameterDefinition>> {
        let kind = YamlParser::get_string(obj, "kind")?;
        warnings.extend(YamlParser::validate_fields(
            obj,
            INNER_FIELDS,
            &format!("parameter wrapped by '{}'", gate_name),
        ));

        let name = YamlParser::get_optional_string(obj, "name")
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| gate_name.to_string());
        let description = YamlParser::get_optional_string(obj, "description");
        let default_value = YamlParser::get_optional_string(obj, "defaultValue");

        let inner: Arc<dyn ParameterDefinition> = match kind.as_str() {
            "string" => {
                let mut param = StringParameter::new(name, default_value.unwrap_or_default());
                if let Some(description) = description {
                    param = param.with_description(description);
                }
                Arc::new(param)
            }
            "text" => {
                let mut param = TextParameter::new(name, default_value.unwrap_or_default());
                if let Some(description) = description {
                    param = param.with_description(description);
                }
                Arc::new(param)
            }
            "boolean" => {
                let default_value = match YamlParser::get_optional_bool(obj, "defaultValue") {
                    Some(b) => b,
                    None => match default_value.as_deref() {
                        None => false,
                        Some(s) if s.eq_ignore_ascii_case("true") => true,
                        Some(s) if s.eq_ignore_ascii_case("false") => false,
                        Some(other) => {
                            return Err(ParseError::InvalidValue {
                                field: "defaultValue".to_string(),
                                message: format!("expected a boolean, got '{}'", other),
                            })
                        }
                    },
                };
                let mut param = BooleanParameter::new(name, default_value);
                if let Some(description) = description {
                    param = param.with_description(description);
                }
                Arc::new(param)
            }
            "choice" => {
                let choices = YamlParser::get_string_list(obj, "choices")?;
                if choices.is_empty() {
                    return Err(ParseError::MissingField {
                        field: "choices".to_string(),
                    });
                }
                let mut param = ChoiceParameter::new(name, choices);
                if let Some(description) = description {
                    param = param.with_description(description);
                }
                Arc::new(param)
            }
            other => {
                return Err(ParseError::InvalidValue {
                    field: "kind".to_string(),
                    message: format!("unknown parameter kind '{}'", other),
                })
            }
        };

        Ok(inner)
    }
}
