use thiserror::Error;
use uuid::Uuid;

use super::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found")]
    OrderNotFound(Uuid),
    #[error("User not found")]
    UserNotFound(Uuid),
    #[error("JSON parse error: {0}")]
    MalformedBody(String),
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),
    #[error("Authentication credentials were not provided")]
    NotAuthenticated,
    #[error("You do not have permission to perform this action")]
    PermissionDenied,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(errors)
    }
}
