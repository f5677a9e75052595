//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] paramgate_parser::ParseError),

    /// Condition evaluation error
    #[error("Evaluation error: {0}")]
    EvalError(#[from] paramgate_core::EvalError),

    /// Parameter value error
    #[error("Gate error: {0}")]
    GateError(#[from] paramgate_core::GateError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid definition file
    #[error("Invalid definition file: {0}")]
    InvalidDefinitionFile(String),

    /// No gate with the given name
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Generic SDK error
    #[error("SDK error: {0}")]
    GenericError(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
