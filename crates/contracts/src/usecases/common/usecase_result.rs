use serde::{Deserialize, Serialize};

use crate::shared::metadata::ValidationError;

/// Result of running a UseCase
pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// Serializable UseCase failure, returned to callers as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl UseCaseError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}

impl From<ValidationError> for UseCaseError {
    fn from(err: ValidationError) -> Self {
        match err.field() {
            Some(field) => UseCaseError::validation(err.to_string()).with_details(field),
            None => UseCaseError::internal(err.to_string()),
        }
    }
}
