//! Service layer error types
//!
//! All service operations fail with one of six tagged values. Moderation
//! handlers flatten any of them into a `{success: false, message}` payload;
//! every other handler maps them onto HTTP status codes.

use forum_common::AppError;
use forum_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// No valid session
    NotAuthenticated,

    /// Session is valid but the actor may not perform this action
    NotAuthorized(String),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// The operation does not apply to the target's current state
    /// (e.g. unbanning a user who is not banned)
    InvalidState(String),

    /// Validation error
    Validation(String),

    /// Database or cache failure
    Persistence(DomainError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "Not authenticated"),
            Self::NotAuthorized(msg) => write!(f, "{msg}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::InvalidState(msg) => write!(f, "{msg}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Persistence(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a not authorized error
    pub fn not_authorized(msg: impl Into<String>) -> Self {
        Self::NotAuthorized(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotAuthenticated => 401,
            Self::NotAuthorized(_) => 403,
            Self::NotFound { .. } => 404,
            Self::InvalidState(_) => 409,
            Self::Validation(_) => 400,
            Self::Persistence(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::NotAuthorized(_) => "NOT_AUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UserNotFound(id) => Self::not_found("User", id.to_string()),
            DomainError::ThreadNotFound(id) => Self::not_found("Thread", id.to_string()),
            DomainError::PostNotFound(id) => Self::not_found("Post", id.to_string()),
            DomainError::CategoryNotFound(id) => Self::not_found("Category", id.to_string()),
            DomainError::SettingNotFound(key) => Self::not_found("Setting", key),
            e if e.is_validation() => Self::Validation(e.to_string()),
            e if e.is_conflict() => Self::InvalidState(e.to_string()),
            e @ (DomainError::ThreadLocked
            | DomainError::FirstPostUndeletable
            | DomainError::UserBanned
            | DomainError::UserMuted) => Self::InvalidState(e.to_string()),
            e => Self::Persistence(e),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotAuthenticated => AppError::MissingAuth,
            ServiceError::NotAuthorized(_) => AppError::InsufficientPermissions,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::InvalidState(msg) => AppError::Conflict(msg),
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Persistence(e) => AppError::Domain(e),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::Snowflake;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("User", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("User not found: 123"));
    }

    #[test]
    fn test_not_authorized_carries_message_verbatim() {
        let err = ServiceError::not_authorized("Only administrators can change user roles");
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.to_string(), "Only administrators can change user roles");
    }

    #[test]
    fn test_invalid_state_error() {
        let err = ServiceError::invalid_state("User is not banned");
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "INVALID_STATE");
    }

    #[test]
    fn test_domain_not_found_maps_to_not_found() {
        let err: ServiceError = DomainError::ThreadNotFound(Snowflake::new(9)).into();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_domain_business_rule_maps_to_invalid_state() {
        let err: ServiceError = DomainError::FirstPostUndeletable.into();
        assert_eq!(err.error_code(), "INVALID_STATE");
        assert!(err.to_string().contains("delete the thread instead"));
    }

    #[test]
    fn test_domain_db_error_maps_to_persistence() {
        let err: ServiceError = DomainError::DatabaseError("connection reset".into()).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "PERSISTENCE_ERROR");
    }
}
