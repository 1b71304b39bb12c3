//! Session state for one storefront visitor.
//!
//! [`Storefront`] composes the identity store, cart, points ledger and
//! checkout over injected collaborators. It keeps them consistent: the ledger
//! is re-seeded whenever the signed-in user changes, and logout discards the
//! cart and balance.

use planetsmart_core::{Product, RewardId, User};
use tracing::instrument;

use crate::config::StorefrontConfig;
use crate::db::CredentialRepository;
use crate::error::{AppError, add_breadcrumb};
use crate::models::{OrderReceipt, ShippingDetails};
use crate::notify::{Notification, Notifier};
use crate::services::auth::{AuthError, IdentityStore, Navigation};
use crate::services::cart::{Cart, CartEvent};
use crate::services::checkout::{Checkout, CheckoutError, CheckoutStep};
use crate::services::points::{PointsLedger, PointsPolicy};
use crate::services::rewards::{self, Reward};
use crate::storage::KeyValueStore;

/// One visitor's session.
pub struct Storefront<R, S, N> {
    identity: IdentityStore<R, S>,
    cart: Cart<N>,
    ledger: PointsLedger,
    checkout: Checkout,
    points_policy: PointsPolicy,
}

impl<R, S, N> Storefront<R, S, N>
where
    R: CredentialRepository,
    S: KeyValueStore,
    N: Notifier,
{
    /// Create a signed-out session.
    ///
    /// # Arguments
    ///
    /// * `config` - Latencies and policies
    /// * `users` - Account roster
    /// * `storage` - Where the session snapshot lives
    /// * `notifier` - Receives user-facing notifications
    #[must_use]
    pub fn new(config: &StorefrontConfig, users: R, storage: S, notifier: N) -> Self {
        Self {
            identity: IdentityStore::new(
                users,
                storage,
                config.auth_latency,
                config.email_matching,
            ),
            cart: Cart::new(notifier),
            ledger: PointsLedger::default(),
            checkout: Checkout::new(config.checkout_latency),
            points_policy: config.points_policy,
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Resume a persisted session, if there is one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the snapshot cannot be read.
    pub async fn restore(&mut self) -> Result<Option<&User>, AuthError> {
        self.identity.restore().await?;
        self.ledger.sync_with(self.identity.current_user());
        Ok(self.identity.current_user())
    }

    /// Log in and seed the points balance from the account.
    ///
    /// # Errors
    ///
    /// See [`IdentityStore::login`].
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.identity.login(email, password).await?;
        self.ledger.sync_with(Some(&user));
        Ok(user)
    }

    /// Create an account, sign in as it, and start from zero points.
    ///
    /// # Errors
    ///
    /// See [`IdentityStore::signup`].
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = self.identity.signup(name, email, password).await?;
        self.ledger.sync_with(Some(&user));
        Ok(user)
    }

    /// Sign out, discarding the cart and points balance.
    pub async fn logout(&mut self) -> Navigation {
        let navigation = self.identity.logout().await;
        self.cart.clear();
        self.checkout.back_to_review();
        self.ledger.sync_with(None);
        navigation
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.identity.current_user()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_authenticated()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The session cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart<N> {
        &self.cart
    }

    /// The session cart, for quantity edits and removals.
    pub const fn cart_mut(&mut self) -> &mut Cart<N> {
        &mut self.cart
    }

    /// Add one unit of `product` to the cart.
    pub fn add_to_cart(&mut self, product: &Product) -> CartEvent {
        let product_id = product.id.to_string();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
        self.cart.add_to_cart(product)
    }

    /// Add `product` to the cart and credit its eco-points.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the write-back policy is on and the new balance
    /// cannot be saved. Neither the cart nor the balance changes in that case.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn buy(&mut self, product: &Product) -> Result<CartEvent, AuthError> {
        self.add_points(u64::from(product.eco_points)).await?;
        Ok(self.add_to_cart(product))
    }

    // =========================================================================
    // Points
    // =========================================================================

    /// Current points balance.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.ledger.balance()
    }

    /// The points ledger.
    #[must_use]
    pub const fn ledger(&self) -> &PointsLedger {
        &self.ledger
    }

    /// Credit `amount` points.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if write-back is on and saving fails; the balance
    /// is unchanged in that case.
    pub async fn add_points(&mut self, amount: u64) -> Result<(), AuthError> {
        let before = self.ledger;
        self.ledger.add_points(amount);
        self.commit(before).await?;
        tracing::debug!(amount, balance = self.ledger.balance(), "Points credited");
        Ok(())
    }

    /// Debit `amount` points if the balance covers it.
    ///
    /// Returns `Ok(false)` with the balance unchanged when it does not.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if write-back is on and saving fails; the balance
    /// is unchanged in that case.
    pub async fn spend_points(&mut self, amount: u64) -> Result<bool, AuthError> {
        let before = self.ledger;
        if !self.ledger.spend_points(amount) {
            tracing::warn!(
                amount,
                balance = self.ledger.balance(),
                "Spend rejected"
            );
            return Ok(false);
        }
        self.commit(before).await?;
        Ok(true)
    }

    /// Redeem a reward with points.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Reward` if the reward is unknown or locked.
    /// Returns `AppError::Auth` if write-back is on and saving fails; the
    /// reward is not claimed and the balance is unchanged in that case.
    #[instrument(skip(self))]
    pub async fn claim_reward(&mut self, id: RewardId) -> Result<&'static Reward, AppError> {
        let before = self.ledger;
        let reward = rewards::claim_reward(&mut self.ledger, id)?;
        self.commit(before).await?;

        add_breadcrumb("rewards", "Claimed reward", Some(&[("reward", reward.title)]));
        self.cart.notifier().notify(Notification::RewardClaimed {
            reward: reward.title.to_string(),
            cost: reward.cost,
        });
        Ok(reward)
    }

    /// Save the ledger, or put `before` back if saving fails.
    async fn commit(&mut self, before: PointsLedger) -> Result<(), AuthError> {
        if let Err(e) = self.write_back().await {
            tracing::warn!(
                error = %e,
                balance = before.balance(),
                "Points change not saved, reverting"
            );
            self.ledger = before;
            return Err(e);
        }
        Ok(())
    }

    async fn write_back(&mut self) -> Result<(), AuthError> {
        if self.points_policy != PointsPolicy::WriteBack || !self.identity.is_authenticated() {
            return Ok(());
        }
        let balance = self.ledger.balance();
        self.identity
            .update_current_user(|user| user.eco_points = balance)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Current checkout step.
    #[must_use]
    pub const fn checkout_step(&self) -> CheckoutStep {
        self.checkout.step()
    }

    /// Move to the shipping details form.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to buy.
    pub fn begin_checkout(&mut self) -> Result<(), CheckoutError> {
        self.checkout.begin(&self.cart)
    }

    /// Place the order for everything in the cart.
    ///
    /// # Errors
    ///
    /// See [`Checkout::submit`].
    pub async fn submit_checkout(
        &mut self,
        details: &ShippingDetails,
    ) -> Result<OrderReceipt, CheckoutError> {
        self.checkout.submit(&mut self.cart, details).await
    }
}
