//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::storage::StorageError;

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format (signup only; login folds this into
    /// `InvalidCredentials`).
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] planetsmart_core::EmailError),

    /// Display name was blank.
    #[error("name must not be empty")]
    InvalidName,

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// No user is signed in.
    #[error("not signed in")]
    NotSignedIn,

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Session snapshot could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Session snapshot could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    /// Message safe to show the user.
    ///
    /// Never reveals whether an email is registered on login.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::UserAlreadyExists => "Email already registered".to_string(),
            Self::InvalidEmail(_) => "Please enter a valid email address".to_string(),
            Self::InvalidName => "Please enter your name".to_string(),
            Self::NotSignedIn => "Please sign in first".to_string(),
            Self::Repository(_) | Self::Storage(_) | Self::Serialization(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.public_message(),
            "Invalid email or password"
        );
        assert_eq!(
            AuthError::UserAlreadyExists.public_message(),
            "Email already registered"
        );
        let internal = AuthError::Repository(RepositoryError::NotFound);
        assert!(!internal.public_message().contains("not found"));
    }
}
