//! YAML Parser
//!
//! Field accessors and unknown-field checks shared by the gate parser.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Get a required string field from YAML object
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        Self::get_optional_string(obj, field).ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })
    }

    /// Get an optional string field from YAML object.
    ///
    /// Scalars are accepted as strings, so `controlValue: 42` reads as `"42"`.
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field).and_then(Self::scalar_to_string)
    }

    /// Get an optional boolean field from YAML object
    pub fn get_optional_bool(obj: &YamlValue, field: &str) -> Option<bool> {
        obj.get(field).and_then(|v| v.as_bool())
    }

    /// Get an optional array field from YAML object
    pub fn get_optional_array<'a>(obj: &'a YamlValue, field: &str) -> Option<&'a Vec<YamlValue>> {
        obj.get(field).and_then(|v| v.as_sequence())
    }

    /// Get an optional list of strings
    pub fn get_string_list(obj: &YamlValue, field: &str) -> Result<Vec<String>> {
        let Some(items) = Self::get_optional_array(obj, field) else {
            return Ok(Vec::new());
        };

        items
            .iter()
            .map(|item| {
                Self::scalar_to_string(item).ok_or_else(|| ParseError::InvalidValue {
                    field: field.to_string(),
                    message: "expected a list of strings".to_string(),
                })
            })
            .collect()
    }

    fn scalar_to_string(value: &YamlValue) -> Option<String> {
        match value {
            YamlValue::String(s) => Some(s.clone()),
            YamlValue::Bool(b) => Some(b.to_string()),
            YamlValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Validate fields in a YAML object against a list of known fields
    /// Returns warnings for unknown fields with suggestions
    pub fn validate_fields(obj: &YamlValue, known_fields: &[&str], context: &str) -> Vec<String> {
        let Some(mapping) = obj.as_mapping() else {
            return Vec::new();
        };

        mapping
            .keys()
            .filter_map(|key| key.as_str())
            .filter(|field| !known_fields.contains(field))
            .map(|field| {
                let correction = FIELD_CORRECTIONS
                    .iter()
                    .find(|(typo, _)| *typo == field)
                    .map(|(_, correct)| correct.to_string())
                    .filter(|correct| known_fields.contains(&correct.as_str()))
                    .or_else(|| Self::find_similar_field(field, known_fields));

                let warning = match correction {
                    Some(correct) => format!(
                        "Unknown field '{}' in {}. Did you mean '{}'?",
                        field, context, correct
                    ),
                    None => format!("Unknown field '{}' in {}.", field, context),
                };
                log::warn!("{}", warning);
                warning
            })
            .collect()
    }

    /// Find similar field names using Levenshtein distance
    fn find_similar_field(field: &str, known_fields: &[&str]) -> Option<String> {
        known_fields
            .iter()
            .map(|known| (known, levenshtein_distance(field, known)))
            .filter(|(_, distance)| *distance <= 2)
            .min_by_key(|(_, distance)| *distance)
            .map(|(known, _)| known.to_string())
    }
}

/// Snake-case spellings of configuration keys
const FIELD_CORRECTIONS: &[(&str, &str)] = &[
    ("control_parameter", "controlParameter"),
    ("control_value", "controlValue"),
    ("operator", "condition"),
    ("logical_operator", "logicalOperator"),
    ("default_value", "defaultValue"),
    ("wrapped_parameter", "wrappedParameter"),
    ("parameter_definition", "parameterDefinition"),
    ("type", "kind"),
];

/// Levenshtein distance, two-row variant
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
