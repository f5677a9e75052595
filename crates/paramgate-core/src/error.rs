//! Error types for PARAMGATE Core

use thiserror::Error;

/// Condition evaluation error
///
/// An evaluation error means visibility could not be determined. It is never
/// a synonym for "hidden".
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
}

/// Gate and parameter value error
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvalError),

    #[error("Invalid value for parameter '{parameter}': {message}")]
    InvalidValue { parameter: String, message: String },
}

pub type Result<T> = std::result::Result<T, EvalError>;
