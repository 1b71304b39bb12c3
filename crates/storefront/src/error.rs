//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for callers that drive a whole session
//! (the CLI, a UI shell). Internal failures are captured to Sentry; the text
//! shown to the user comes from [`AppError::public_message`].

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::services::rewards::RewardError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Identity operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Reward could not be claimed.
    #[error("Reward error: {0}")]
    Reward(#[from] RewardError),

    /// Account storage failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Session storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration was invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether this error is a fault rather than a rejected user action.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Repository(_)
                | Self::Storage(_)
                | Self::Config(_)
                | Self::Auth(
                    AuthError::Repository(_) | AuthError::Storage(_) | AuthError::Serialization(_)
                )
        )
    }

    /// Capture internal errors to Sentry. User-facing rejections are skipped.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        }
    }

    /// Message safe to show the user.
    #[must_use]
    pub fn public_message(&self) -> String {
        // Don't expose internal error details to users
        match self {
            Self::Auth(err) => err.public_message(),
            Self::Checkout(err) => err.to_string(),
            Self::Reward(RewardError::InsufficientPoints { needed, .. }) => {
                format!("Need {needed} Points")
            }
            Self::Reward(err) => err.to_string(),
            Self::Repository(_) | Self::Storage(_) | Self::Config(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use planetsmart_core::RewardId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: your cart is empty");
    }

    #[test]
    fn test_public_messages_hide_internals() {
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).public_message(),
            "Invalid email or password"
        );
        assert_eq!(
            AppError::from(RewardError::InsufficientPoints {
                needed: 750,
                balance: 10
            })
            .public_message(),
            "Need 750 Points"
        );

        let internal = AppError::from(RepositoryError::Conflict("users_email_key".to_string()));
        assert!(internal.is_internal());
        assert!(!internal.public_message().contains("users_email_key"));
    }

    #[test]
    fn test_rejections_are_not_internal() {
        assert!(!AppError::from(AuthError::UserAlreadyExists).is_internal());
        assert!(!AppError::from(RewardError::UnknownReward(RewardId::new(1))).is_internal());
        assert!(AppError::from(AuthError::Repository(RepositoryError::NotFound)).is_internal());
    }

    #[test]
    fn test_sentry_helpers_without_client() {
        set_sentry_user(&42, Some("a@b.com"));
        add_breadcrumb("test", "breadcrumb", Some(&[("key", "value")]));
        clear_sentry_user();
    }
}
