//! Auth Error Types
//!
//! Every variant ends the current form submission only. None are retried and
//! none are fatal to the app.

use crate::storage::{CredentialError, StorageError, UniqueField};
use crate::validation::{Field, ValidationError};
use thiserror::Error;

/// Message shown for a failed login; deliberately does not say which field
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Auth workflow errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing or malformed field
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Name or email already registered
    #[error("{}", .0.message())]
    DuplicateKey(UniqueField),

    /// No user with that identifier and secret
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Backend failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::DuplicateKey(field) => AuthError::DuplicateKey(field),
            CredentialError::Storage(e) => AuthError::Storage(e),
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Storage(err.into())
    }
}

impl AuthError {
    /// Form fields to mark as invalid
    pub fn marked_fields(&self) -> Vec<Field> {
        match self {
            AuthError::Validation(e) => vec![e.field],
            AuthError::DuplicateKey(UniqueField::Name) => vec![Field::Name],
            AuthError::DuplicateKey(UniqueField::Email) => vec![Field::Email],
            AuthError::InvalidCredentials => vec![Field::Identifier, Field::Password],
            AuthError::Storage(_) => Vec::new(),
        }
    }

    /// Short code for logs and machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::DuplicateKey(_) => "DUPLICATE_KEY",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;
