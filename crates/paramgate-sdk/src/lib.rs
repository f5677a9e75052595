//! PARAMGATE SDK
//!
//! High-level API for loading gate definitions and evaluating a whole form
//! against the values submitted for one request.

pub mod builder;
pub mod config;
pub mod error;
pub mod form_evaluator;

// Re-export main types
pub use builder::FormEvaluatorBuilder;
pub use config::EvaluatorConfig;
pub use error::{Result, SdkError};
pub use form_evaluator::{FormEvaluator, FormOutcome, GateOutcome, Visibility};

// Re-export commonly used types from dependencies
pub use paramgate_core::{
    Condition, ConditionSet, ConditionTrace, Operator, ParameterGate, ParameterValue,
    RequestValues, TypedValue, ValueLookup,
};
pub use paramgate_parser::GateKind;
