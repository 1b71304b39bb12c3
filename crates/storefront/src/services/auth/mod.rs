//! Identity store.
//!
//! Tracks who is signed in, checks credentials against a
//! [`CredentialRepository`], and keeps a snapshot of the signed-in user in a
//! [`KeyValueStore`] under [`SESSION_USER_KEY`] so the session survives a
//! restart.

mod error;

pub use error::AuthError;

use std::time::Duration;

use chrono::Utc;
use secrecy::SecretString;
use serde::Serialize;
use tracing::instrument;

use planetsmart_core::{Email, EmailMatching, User};

use crate::db::users::NewAccount;
use crate::db::{CredentialRepository, RepositoryError};
use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::storage::{KeyValueStore, SESSION_USER_KEY};

/// Where the UI should go after an identity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The login/signup screen.
    AuthScreen,
}

/// The `{success, message}` pair the auth form displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
}

impl AuthOutcome {
    /// Outcome of a login attempt.
    #[must_use]
    pub fn login(result: &Result<User, AuthError>) -> Self {
        Self::from_result(result, "Login successful!")
    }

    /// Outcome of a signup attempt.
    #[must_use]
    pub fn signup(result: &Result<User, AuthError>) -> Self {
        Self::from_result(result, "Account created successfully!")
    }

    fn from_result(result: &Result<User, AuthError>, success_message: &str) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                message: success_message.to_string(),
            },
            Err(err) => Self {
                success: false,
                message: err.public_message(),
            },
        }
    }
}

/// Identity store.
///
/// Holds at most one current user. Login and signup wait out a simulated
/// latency before touching any state, so dropping either future cancels it
/// cleanly.
pub struct IdentityStore<R, S> {
    users: R,
    storage: S,
    current: Option<User>,
    latency: Duration,
    matching: EmailMatching,
}

impl<R: CredentialRepository, S: KeyValueStore> IdentityStore<R, S> {
    /// Create a signed-out identity store.
    #[must_use]
    pub const fn new(users: R, storage: S, latency: Duration, matching: EmailMatching) -> Self {
        Self {
            users,
            storage,
            current: None,
            latency,
            matching,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Load the persisted snapshot, if any.
    ///
    /// A snapshot that fails to decode is logged, deleted, and treated as
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn restore(&mut self) -> Result<Option<&User>, AuthError> {
        let Some(raw) = self.storage.get(SESSION_USER_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Session restored");
                set_sentry_user(&user.id, Some(user.email.as_str()));
                self.current = Some(user);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding corrupt session snapshot");
                if let Err(e) = self.storage.remove(SESSION_USER_KEY).await {
                    tracing::warn!(error = %e, "Failed to remove corrupt session snapshot");
                }
                self.current = None;
            }
        }
        Ok(self.current.as_ref())
    }

    /// Sign out and forget the persisted snapshot.
    ///
    /// Always succeeds; a snapshot that cannot be removed is logged.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Navigation {
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        if let Err(e) = self.storage.remove(SESSION_USER_KEY).await {
            tracing::warn!(error = %e, "Failed to remove session snapshot");
        }
        clear_sentry_user();
        add_breadcrumb("auth", "Logged out", None);
        Navigation::AuthScreen
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is malformed, not
    /// registered, or the password is wrong.
    /// Returns `AuthError::Storage` if the snapshot cannot be saved.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        tokio::time::sleep(self.latency).await;

        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let record = self
            .users
            .find_by_email(&email, self.matching)
            .await?
            .filter(|record| record.password_matches(password))
            .ok_or_else(|| {
                tracing::info!("Login rejected");
                AuthError::InvalidCredentials
            })?;

        let user = record.user;
        self.persist(&user).await?;
        self.current = Some(user.clone());

        tracing::info!(user_id = %user.id, "User logged in");
        set_sentry_user(&user.id, Some(user.email.as_str()));
        add_breadcrumb("auth", "Logged in", None);
        Ok(user)
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidName` if the name is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    /// Returns `AuthError::Storage` if the snapshot cannot be saved; the new
    /// account is removed again in that case.
    #[instrument(skip(self, password))]
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::InvalidName);
        }
        let email = Email::parse(email)?;

        tokio::time::sleep(self.latency).await;

        let account = NewAccount {
            name: name.to_string(),
            email,
            password: SecretString::from(password),
            join_date: Utc::now().date_naive(),
        };
        let user = self
            .users
            .create(account, self.matching)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        if let Err(e) = self.persist(&user).await {
            if let Err(undo) = self.users.delete(user.id).await {
                tracing::warn!(user_id = %user.id, error = %undo, "Failed to remove unsaved account");
            }
            return Err(e);
        }
        self.current = Some(user.clone());

        tracing::info!(user_id = %user.id, "User signed up");
        set_sentry_user(&user.id, Some(user.email.as_str()));
        add_breadcrumb("auth", "Signed up", None);
        Ok(user)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Apply `update` to the signed-in user and save it to the repository and
    /// the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` if nobody is signed in.
    /// Returns `AuthError::Repository` or `AuthError::Storage` if saving fails;
    /// the in-memory user and the repository record are unchanged in that case.
    pub async fn update_current_user(
        &mut self,
        update: impl FnOnce(&mut User),
    ) -> Result<&User, AuthError> {
        let previous = self.current.clone().ok_or(AuthError::NotSignedIn)?;
        let mut user = previous.clone();
        update(&mut user);

        self.users.update_user(&user).await?;
        if let Err(e) = self.persist(&user).await {
            if let Err(undo) = self.users.update_user(&previous).await {
                tracing::warn!(user_id = %user.id, error = %undo, "Failed to restore profile");
            }
            return Err(e);
        }
        tracing::debug!(user_id = %user.id, "Profile saved");
        Ok(self.current.insert(user))
    }

    async fn persist(&self, user: &User) -> Result<(), AuthError> {
        let snapshot = serde_json::to_string(user)?;
        self.storage.set(SESSION_USER_KEY, &snapshot).await?;
        Ok(())
    }
}
