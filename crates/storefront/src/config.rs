//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `PLANETSMART_DATA_DIR` - Directory for the persisted session (default: .planetsmart)
//! - `PLANETSMART_AUTH_LATENCY_MS` - Simulated login/signup latency (default: 1000)
//! - `PLANETSMART_CHECKOUT_LATENCY_MS` - Simulated order processing latency (default: 2000)
//! - `PLANETSMART_POINTS_POLICY` - `ephemeral` or `write-back` (default: ephemeral)
//! - `PLANETSMART_EMAIL_MATCHING` - `exact` or `case-insensitive` (default: exact)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use planetsmart_core::EmailMatching;

use crate::services::points::PointsPolicy;

const DEFAULT_DATA_DIR: &str = ".planetsmart";
const DEFAULT_AUTH_LATENCY_MS: u64 = 1000;
const DEFAULT_CHECKOUT_LATENCY_MS: u64 = 2000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Where the file-backed session store keeps its data
    pub data_dir: PathBuf,
    /// Delay before login and signup resolve
    pub auth_latency: Duration,
    /// Delay before a checkout submission resolves
    pub checkout_latency: Duration,
    /// Whether spent and earned points are written back to the user record
    pub points_policy: PointsPolicy,
    /// How emails are compared for login and duplicate detection
    pub email_matching: EmailMatching,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    /// Zero-latency configuration, suitable for tests.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            auth_latency: Duration::ZERO,
            checkout_latency: Duration::ZERO,
            points_policy: PointsPolicy::default(),
            email_matching: EmailMatching::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("PLANETSMART_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let auth_latency = Duration::from_millis(parse_or_default(
            &lookup,
            "PLANETSMART_AUTH_LATENCY_MS",
            DEFAULT_AUTH_LATENCY_MS,
        )?);
        let checkout_latency = Duration::from_millis(parse_or_default(
            &lookup,
            "PLANETSMART_CHECKOUT_LATENCY_MS",
            DEFAULT_CHECKOUT_LATENCY_MS,
        )?);
        let points_policy = parse_or_default(
            &lookup,
            "PLANETSMART_POINTS_POLICY",
            PointsPolicy::default(),
        )?;
        let email_matching = parse_or_default(
            &lookup,
            "PLANETSMART_EMAIL_MATCHING",
            EmailMatching::default(),
        )?;

        Ok(Self {
            data_dir,
            auth_latency,
            checkout_latency,
            points_policy,
            email_matching,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise fall back to `default`.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
