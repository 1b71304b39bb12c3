//! Integration tests for the PlanetSmart storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p planetsmart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `identity` - Login, signup, logout and session restore
//! - `cart_points` - Cart totals, the points ledger and its policies
//! - `catalog` - Catalog queries and product comparison
//! - `checkout_rewards` - Checkout flow and reward redemption

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc::UnboundedReceiver;

use planetsmart_storefront::Storefront;
use planetsmart_storefront::config::StorefrontConfig;
use planetsmart_storefront::db::users::InMemoryRoster;
use planetsmart_storefront::notify::{ChannelNotifier, Notification};
use planetsmart_storefront::storage::{KeyValueStore, MemoryStore, StorageError};

/// Session type used across the integration tests.
pub type TestStorefront<S = MemoryStore> = Storefront<InMemoryRoster, S, ChannelNotifier>;

/// A session plus the notifications it emits.
pub struct TestContext<S = MemoryStore> {
    pub storefront: TestStorefront<S>,
    pub notifications: UnboundedReceiver<Notification>,
}

impl TestContext {
    /// Zero-latency session over the demo roster and an in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&StorefrontConfig::default())
    }

    /// Session over the demo roster and an in-memory store.
    #[must_use]
    pub fn with_config(config: &StorefrontConfig) -> Self {
        Self::with_storage(config, MemoryStore::new())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: KeyValueStore> TestContext<S> {
    /// Session over the demo roster and the given store.
    #[must_use]
    pub fn with_storage(config: &StorefrontConfig, storage: S) -> Self {
        Self::with_parts(config, InMemoryRoster::demo(), storage)
    }

    /// Session over the given roster and store. Sessions built from clones of
    /// one roster see each other's accounts.
    #[must_use]
    pub fn with_parts(config: &StorefrontConfig, roster: InMemoryRoster, storage: S) -> Self {
        let (notifier, notifications) = ChannelNotifier::new();
        Self {
            storefront: Storefront::new(config, roster, storage, notifier),
            notifications,
        }
    }

    /// Drain every notification sent so far.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut drained = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            drained.push(notification);
        }
        drained
    }
}

/// Every demo account email with its starting balance. All share `DEMO_PASSWORD`.
pub const DEMO_ACCOUNTS: [(&str, u64); 4] = [
    ("shashank@gmail.com", 1250),
    ("harsh@gmail.com", 890),
    ("ishita@gmail.com", 2100),
    ("adarsh@gmail.com", 650),
];

// =============================================================================
// Storage
// =============================================================================

/// In-memory store whose writes can be switched off. Clones share the switch.
#[derive(Debug, Clone, Default)]
pub struct SwitchableStore {
    inner: MemoryStore,
    read_only: Arc<AtomicBool>,
}

impl SwitchableStore {
    /// A writable, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `set` and `remove` fail, or succeed again.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other("store is read-only")));
        }
        Ok(())
    }
}

impl KeyValueStore for SwitchableStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.inner.remove(key).await
    }
}
