// Usecase layer: thin orchestration between handlers and repositories

pub mod todo_service;
pub mod user_service;

pub use todo_service::TodoService;
pub use user_service::{Session, UserService};

use crate::auth::{PasswordError, TokenError};
use crate::database::DatabaseError;

/// Usecase-level error kinds
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            DatabaseError::Conflict(msg) => ServiceError::Conflict(msg),
            DatabaseError::ConnectionError(msg) => {
                ServiceError::Internal(format!("database unavailable: {}", msg))
            }
            DatabaseError::Sqlx(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

/// Presence check shared by the request-level validations
fn require(value: &str, field: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
