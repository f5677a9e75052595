//! PARAMGATE Core - Condition evaluation for conditional form parameters
//!
//! This crate decides whether a gated form parameter is active for one
//! request, based on the values submitted for other parameters:
//! - Condition types (operator, single condition, condition set)
//! - Value lookup over the submitted request values
//! - The short-circuiting evaluator
//! - Parameter gates and the parameter kinds they wrap
//! - Error types

pub mod condition;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod lookup;
pub mod parameter;

// Re-export commonly used types
pub use condition::{Combinator, Condition, ConditionOperator, ConditionSet, Operator};
pub use error::{EvalError, GateError};
pub use evaluator::{
    evaluate, evaluate_condition, ConditionTrace, ConditionVariant, EvaluationOptions, Evaluator,
    UnknownOperatorPolicy,
};
pub use gate::{GateBuilder, GateRule, ParameterGate};
pub use lookup::{RequestValues, ValueLookup};
pub use parameter::{
    BooleanParameter, ChoiceParameter, ParameterDefinition, ParameterValue, StringParameter,
    TextParameter, TypedValue,
};
