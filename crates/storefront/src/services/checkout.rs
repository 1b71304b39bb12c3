//! Two-step checkout over the session cart.
//!
//! `Review` shows the cart; `Details` collects the shipping form. Submitting
//! waits out the processing latency first and only then touches the cart, so
//! a submit future dropped mid-wait leaves everything as it was.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::error::add_breadcrumb;
use crate::models::{OrderReceipt, ShippingDetails};
use crate::notify::{Notification, Notifier};
use crate::services::cart::Cart;

/// Where the checkout flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutStep {
    #[default]
    Review,
    Details,
}

/// Checkout failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("your cart is empty")]
    EmptyCart,

    /// Submit called before the details step.
    #[error("checkout has not been started")]
    NotStarted,

    /// Required form fields were blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Checkout state machine.
#[derive(Debug, Clone)]
pub struct Checkout {
    step: CheckoutStep,
    latency: Duration,
}

impl Checkout {
    /// A checkout that takes `latency` to process an order.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self {
            step: CheckoutStep::Review,
            latency,
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Move from review to the details form.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines.
    pub fn begin<N: Notifier>(&mut self, cart: &Cart<N>) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.step = CheckoutStep::Details;
        tracing::debug!(items = cart.item_count(), "Checkout started");
        Ok(())
    }

    /// Return to the review step without placing an order.
    pub fn back_to_review(&mut self) {
        self.step = CheckoutStep::Review;
    }

    /// Place the order.
    ///
    /// On success the cart is emptied, the step resets to review, and an
    /// `OrderPlaced` notification is sent.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotStarted` outside the details step.
    /// Returns `CheckoutError::EmptyCart` if the cart was emptied meanwhile.
    /// Returns `CheckoutError::MissingFields` if the form is incomplete.
    #[instrument(skip(self, cart, details))]
    pub async fn submit<N: Notifier>(
        &mut self,
        cart: &mut Cart<N>,
        details: &ShippingDetails,
    ) -> Result<OrderReceipt, CheckoutError> {
        if self.step != CheckoutStep::Details {
            return Err(CheckoutError::NotStarted);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let missing = details.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        tokio::time::sleep(self.latency).await;

        let receipt = OrderReceipt {
            confirmation: Uuid::new_v4(),
            total: cart.cart_total(),
            impact: cart.total_impact(),
            eco_points: cart.total_eco_points(),
            payment: details.payment,
            placed_at: Utc::now(),
            lines: cart.take_lines(),
        };
        self.step = CheckoutStep::Review;

        tracing::info!(
            confirmation = %receipt.confirmation,
            total = %receipt.total,
            eco_points = receipt.eco_points,
            "Order placed"
        );
        let total = receipt.total.to_string();
        add_breadcrumb("checkout", "Order placed", Some(&[("total", total.as_str())]));
        cart.notifier().notify(Notification::OrderPlaced {
            total: receipt.total,
            eco_points: receipt.eco_points,
        });

        Ok(receipt)
    }
}
