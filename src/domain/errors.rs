use thiserror::Error;

use super::validation::InputField;

/// Message shown to the user whenever a submission fails validation.
pub const INVALID_INPUT_ALERT: &str = "Inputs have to be positive numbers.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{field} must be a positive whole number, got {value:?}")]
    InvalidInput { field: InputField, value: String },
}

impl DomainError {
    /// The alert-level text presented for this error.
    pub fn alert_message(&self) -> &'static str {
        match self {
            DomainError::InvalidInput { .. } => INVALID_INPUT_ALERT,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
