//! Account storage for the storefront.
//!
//! # Repositories
//!
//! - [`CredentialRepository`] - the account roster: public profile plus password
//!
//! The only implementation today is [`users::InMemoryRoster`], seeded with the
//! demo accounts. A real backing store implements the same trait.

pub mod users;

use thiserror::Error;

use planetsmart_core::{Email, EmailMatching, User, UserId};

use users::{CredentialRecord, NewAccount};

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Storage for account credentials.
pub trait CredentialRepository {
    /// Find the account registered under `email`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backing store fails.
    async fn find_by_email(
        &self,
        email: &Email,
        matching: EmailMatching,
    ) -> Result<Option<CredentialRecord>, RepositoryError>;

    /// Register a new account and return its profile.
    ///
    /// The repository assigns the user ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an account with a matching email
    /// already exists.
    async fn create(
        &self,
        account: NewAccount,
        matching: EmailMatching,
    ) -> Result<User, RepositoryError>;

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no account has this ID.
    async fn delete(&self, id: UserId) -> Result<(), RepositoryError>;

    /// Replace the public profile of an existing account, keeping its password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no account has this user's ID.
    async fn update_user(&self, user: &User) -> Result<(), RepositoryError>;
}
