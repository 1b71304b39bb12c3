//! Subcommand implementations.

pub mod account;
pub mod catalog;
pub mod rewards;

use planetsmart_storefront::Storefront;
use planetsmart_storefront::config::StorefrontConfig;
use planetsmart_storefront::db::users::InMemoryRoster;
use planetsmart_storefront::notify::LogNotifier;
use planetsmart_storefront::services::auth::AuthError;
use planetsmart_storefront::storage::FileStore;

/// A storefront session backed by the profile directory.
pub type Session = Storefront<InMemoryRoster, FileStore, LogNotifier>;

/// Open the session stored under the configured data directory.
///
/// The roster is the demo roster; accounts created by `signup` live only in
/// the saved snapshot.
///
/// # Errors
///
/// Returns `AuthError::Storage` if the saved session cannot be read.
pub async fn open_session(config: &StorefrontConfig) -> Result<Session, AuthError> {
    let mut session = Storefront::new(
        config,
        InMemoryRoster::demo(),
        FileStore::new(config.data_dir.clone()),
        LogNotifier,
    );
    session.restore().await?;
    Ok(session)
}
