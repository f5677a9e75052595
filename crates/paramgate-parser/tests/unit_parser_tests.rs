//! Unit tests for gate definition parsing
//!
//! Tests YAML loading of every gate kind, wrapped parameter kinds,
//! unknown-field warnings and configuration-time validation of parsed gates.

use paramgate_core::{
    Combinator, ConditionOperator, GateRule, Operator, RequestValues, TypedValue,
};
use paramgate_parser::*;
use serde_json::json;

const RELEASE_FORM: &str = r#"
version: "1.0"
parameters:
  - kind: smartParameter
    name: HOTFIX_ID
    description: Ticket of the hotfix
    defaultValue: none
    controlParameter: type
    condition: equals
    controlValue: hotfix

  - kind: conditionalParameter
    name: ROLLBACK
    controlParameter: env
    condition: notEquals
    controlValue: dev
    parameterDefinition:
      kind: boolean
      defaultValue: false

  - kind: smartWrapperParameter
    name: NOTES
    controlParameter: branch
    condition: endsWith
    controlValue: -rc
    wrappedParameter:
      kind: text
      defaultValue: "n/a"

  - kind: multiConditionParameter
    name: DEPLOY_TARGET
    logicalOperator: AND
    conditions:
      - controlParameter: branch
        condition: startsWith
        controlValue: release-
      - controlParameter: env
        condition: regex
        controlValue: "prod|staging"
    wrappedParameter:
      kind: choice
      name: TARGET
      choices:
        - eu-west
        - us-east
"#;

fn parse_release_form() -> GateDocument {
    GateParser::parse(RELEASE_FORM).expect("release form should parse")
}

// =============================================================================
// Document Parsing Tests
// =============================================================================

#[test]
fn test_parse_all_kinds() {
    let doc = parse_release_form();

    let kinds: Vec<GateKind> = doc.definitions.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            GateKind::SmartParameter,
            GateKind::ConditionalParameter,
            GateKind::SmartWrapperParameter,
            GateKind::MultiConditionParameter,
        ]
    );
    assert_eq!(doc.version.as_deref(), Some("1.0"));
    assert!(doc.warnings.is_empty(), "unexpected warnings: {:?}", doc.warnings);

    let names: Vec<&str> = doc.gates().map(|g| g.name()).collect();
    assert_eq!(names, vec!["HOTFIX_ID", "ROLLBACK", "NOTES", "DEPLOY_TARGET"]);
}

#[test]
fn test_parsed_gates_evaluate() {
    let doc = parse_release_form();
    let values = RequestValues::new()
        .with("type", "feature")
        .with("env", "prod")
        .with("branch", "release-2.3");

    let active: Vec<bool> = doc
        .gates()
        .map(|g| g.is_active(&values).unwrap())
        .collect();
    assert_eq!(active, vec![false, true, false, true]);
}

#[test]
fn test_multi_condition_rule_shape() {
    let doc = parse_release_form();
    let gate = &doc.definitions[3].gate;

    let GateRule::Set(set) = gate.rule() else {
        panic!("Expected condition set, got {:?}", gate.rule());
    };
    assert_eq!(set.combinator(), Combinator::And);
    assert_eq!(
        set.conditions()[1].operator(),
        &ConditionOperator::Known(Operator::Regex)
    );
    assert_eq!(set.conditions()[1].control_value(), Some("prod|staging"));
}

#[test]
fn test_numeric_control_value_reads_as_string() -> anyhow::Result<()> {
    let yaml = r#"
parameters:
  - kind: smartParameter
    name: X
    controlParameter: replicas
    condition: equals
    controlValue: 3
"#;
    let doc = GateParser::parse(yaml)?;
    let values = RequestValues::new().with("replicas", "3");
    assert!(doc.definitions[0].gate.is_active(&values)?);
    Ok(())
}

#[test]
fn test_unknown_logical_operator_reads_as_or() {
    let yaml = r#"
parameters:
  - kind: multiConditionParameter
    name: X
    logicalOperator: XOR
    conditions:
      - controlParameter: a
        condition: equals
        controlValue: "1"
      - controlParameter: b
        condition: equals
        controlValue: "2"
"#;
    let doc = GateParser::parse(yaml).unwrap();
    let GateRule::Set(set) = doc.definitions[0].gate.rule() else {
        panic!("Expected condition set");
    };
    assert_eq!(set.combinator(), Combinator::Or);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let result = GateParser::parse("parameters: [");
    assert!(matches!(result, Err(ParseError::YamlError(_))));
}

#[test]
fn test_non_mapping_condition_is_an_error() {
    let yaml = r#"
parameters:
  - kind: multiConditionParameter
    name: X
    conditions:
      - "branch startsWith release-"
"#;
    let err = GateParser::parse(yaml).unwrap_err();
    assert!(err.to_string().contains("conditions[0]"));
}

// =============================================================================
// Wrapped Parameter Tests
// =============================================================================

#[test]
fn test_wrapped_choice_parameter() {
    let doc = parse_release_form();
    let gate = &doc.definitions[3].gate;
    let inner = gate.inner().expect("choice parameter");
    assert_eq!(inner.name(), "TARGET");

    let value = gate
        .create_value(Some(&json!({"name": "TARGET", "value": "us-east"})))
        .unwrap()
        .unwrap();
    assert_eq!(value.value, TypedValue::String("us-east".to_string()));

    assert!(gate
        .create_value(Some(&json!({"name": "TARGET", "value": "ap-south"})))
        .is_err());
}

#[test]
fn test_wrapped_name_defaults_to_gate_name() {
    let doc = parse_release_form();
    let notes = &doc.definitions[2].gate;
    assert_eq!(notes.inner().map(|p| p.name()), Some("NOTES"));

    let value = notes.create_value(None).unwrap().unwrap();
    assert_eq!(value.value, TypedValue::Text("n/a".to_string()));
}

#[test]
fn test_wrapped_boolean_parameter() {
    let doc = parse_release_form();
    let rollback = &doc.definitions[1].gate;

    let value = rollback.create_value_from_str("TRUE").unwrap();
    assert_eq!(value.value, TypedValue::Boolean(true));
    assert_eq!(
        rollback.create_value(None).unwrap().map(|v| v.value),
        Some(TypedValue::Boolean(false))
    );
}

#[test]
fn test_smart_parameter_uses_own_default() {
    let doc = parse_release_form();
    let hotfix = &doc.definitions[0].gate;

    assert!(hotfix.inner().is_none());
    let value = hotfix.create_value(None).unwrap().unwrap();
    assert_eq!(value.value, TypedValue::Text("none".to_string()));
    assert_eq!(value.description.as_deref(), Some("Ticket of the hotfix"));

    let submitted = hotfix
        .create_value(Some(&json!({"name": "HOTFIX_ID", "value": "HF-7"})))
        .unwrap()
        .unwrap();
    assert_eq!(submitted.value, TypedValue::String("HF-7".to_string()));
}

#[test]
fn test_conditional_parameter_without_definition_keeps_default() {
    let yaml = r#"
parameters:
  - kind: conditionalParameter
    name: ROLLBACK_TO
    defaultValue: previous
    controlParameter: env
    condition: equals
    controlValue: prod
"#;
    let doc = GateParser::parse(yaml).unwrap();
    let gate = &doc.definitions[0].gate;

    assert!(!gate.uses_submitted_value());
    let value = gate
        .create_value(Some(&json!({"name": "ROLLBACK_TO", "value": "2.3"})))
        .unwrap()
        .unwrap();
    assert_eq!(value.value, TypedValue::String("previous".to_string()));
}

#[test]
fn test_unknown_wrapped_kind_is_an_error() {
    let yaml = r#"
parameters:
  - kind: smartWrapperParameter
    name: X
    wrappedParameter:
      kind: password
"#;
    assert!(matches!(
        GateParser::parse(yaml),
        Err(ParseError::InvalidValue { ref field, .. }) if field == "kind"
    ));
}

#[test]
fn test_choice_without_choices_is_an_error() {
    let yaml = r#"
parameters:
  - kind: smartWrapperParameter
    name: X
    wrappedParameter:
      kind: choice
"#;
    assert!(matches!(
        GateParser::parse(yaml),
        Err(ParseError::MissingField { ref field }) if field == "choices"
    ));
}

// =============================================================================
// Warning Tests
// =============================================================================

#[test]
fn test_ref_parameter_is_accepted_on_wrappers() {
    let yaml = r#"
parameters:
  - kind: smartWrapperParameter
    name: X
    refParameter: Y
    wrappedParameter:
      kind: string
"#;
    let doc = GateParser::parse(yaml).unwrap();
    assert!(doc.warnings.is_empty());
}

#[test]
fn test_misplaced_field_warns() {
    let yaml = r#"
parameters:
  - kind: smartParameter
    name: X
    conditions: []
    wrappedParameter:
      kind: string
"#;
    let doc = GateParser::parse(yaml).unwrap();
    assert_eq!(doc.warnings.len(), 2);
    assert!(doc.warnings.iter().all(|w| w.contains("smartParameter 'X'")));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_release_form_validates() {
    let doc = parse_release_form();
    for def in &doc.definitions {
        assert!(
            validate_gate(&def.gate, def.kind).is_ok(),
            "{} should validate",
            def.gate.name()
        );
    }
}

#[test]
fn test_incomplete_definitions_parse_but_fail_validation() {
    let yaml = r#"
parameters:
  - kind: smartWrapperParameter
    name: X
    condition: regex
    controlValue: "("
  - kind: multiConditionParameter
    name: Y
    conditions:
      - controlParameter: env
        condition: equals
"#;
    let doc = GateParser::parse(yaml).unwrap();

    let x = validate_gate(&doc.definitions[0].gate, doc.definitions[0].kind).unwrap_err();
    let errors: Vec<_> = x.iter().map(|i| i.error.clone()).collect();
    assert_eq!(
        errors,
        vec![
            ValidationError::MissingWrappedParameter,
            ValidationError::InvalidConditionType("regex".to_string()),
            ValidationError::EmptyControlParameter,
        ]
    );

    let y = validate_gate(&doc.definitions[1].gate, doc.definitions[1].kind).unwrap_err();
    assert!(y.contains(&GateIssue {
        condition_index: Some(0),
        error: ValidationError::EmptyControlValue,
    }));

    // Incomplete conditions still evaluate, failing open
    let values = RequestValues::new();
    assert!(doc.definitions[1].gate.is_active(&values).unwrap());
}

#[test]
fn test_descriptor_registry() {
    assert_eq!(descriptors().len(), 4);
    assert_eq!(
        GateKind::from_symbol("conditionalParameter")
            .map(|k| k.descriptor().display_name),
        Some("Conditional Parameter")
    );
    assert_eq!(operator_items(GateKind::SmartParameter.variant()).len(), 5);
    assert_eq!(operator_items(GateKind::MultiConditionParameter.variant()).len(), 6);
}
