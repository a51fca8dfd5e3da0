//! Engine errors.

use thiserror::Error;

use crate::params::Parameter;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LinkBudgetError {
    /// Frequency or distance was zero, negative or not finite.
    #[error("invalid input: {parameter} must be a positive finite value (got {value})")]
    InvalidInput { parameter: Parameter, value: f64 },
}
