//! Engine error types

use thiserror::Error;

/// Errors raised by the calculator protocol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    /// `accumulate` or `calculate` was called before `set_parameters`
    #[error("Calculator is not configured: set parameters before calling {0}")]
    NotConfigured(&'static str),
}

/// Errors raised while parsing date bounds and post timestamps
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Invalid timestamp '{0}': expected RFC 3339 or YYYY-MM-DD")]
    Invalid(String),
}
