//! Global application error types.
//!
//! This module defines the error taxonomy shared by the credential service,
//! its repositories and the HTTP layer. Conversion to HTTP responses lives in
//! `api::common`.

use thiserror::Error;

/// Errors produced by the credential service and its collaborators
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Registration attempted with an email that already has an account
    #[error("User already exists: {email}")]
    DuplicateAccount { email: String },

    /// Unknown email or wrong password; the two cases are never distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn duplicate_account(email: impl Into<String>) -> Self {
        Self::DuplicateAccount {
            email: email.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

// Storage failures carry their full context chain as the surfaced message.
impl From<anyhow::Error> for ServiceError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal_error(format!("{:#}", error))
    }
}
