//! PARAMGATE Parser - YAML definitions for gated form parameters
//!
//! This crate loads gate definitions from YAML and provides the
//! configuration-time metadata and field validation used by form editors.

pub mod descriptor;
pub mod error;
pub mod gate_parser;
pub mod validation;
pub mod yaml_parser;

// Re-export main parser types
pub use descriptor::{combinator_items, descriptors, operator_items, Descriptor, GateKind, ListItem};
pub use error::{ParseError, Result};
pub use gate_parser::{GateDefinition, GateDocument, GateParser};
pub use validation::{
    check_control_parameter, check_control_value, check_operator, check_wrapped_parameter,
    validate_gate, GateIssue, ValidationError,
};
pub use yaml_parser::YamlParser;
