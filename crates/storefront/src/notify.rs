//! Outbound user notifications.
//!
//! Stores fire notifications and forget them: nothing in the core ever waits
//! on, queries, or reacts to delivery. The UI layer decides how to show them
//! (a toast, a status line, nothing at all).

use serde::Serialize;
use tokio::sync::mpsc;

use planetsmart_core::Price;

/// Something worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// A product was added to the cart for the first time.
    AddedToCart { product: String },
    /// A product already in the cart had its quantity bumped.
    QuantityUpdated { product: String, quantity: u32 },
    /// Checkout completed.
    OrderPlaced { total: Price, eco_points: u64 },
    /// A reward was redeemed with points.
    RewardClaimed { reward: String, cost: u64 },
}

impl Notification {
    /// Short headline.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::AddedToCart { .. } => "Added to Cart!",
            Self::QuantityUpdated { .. } => "Quantity Updated!",
            Self::OrderPlaced { .. } => "Order Placed!",
            Self::RewardClaimed { .. } => "Reward Claimed!",
        }
    }

    /// One-line body text.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::AddedToCart { product } => format!("{product} has been added to your cart"),
            Self::QuantityUpdated { product, quantity } => {
                format!("{product} quantity increased to {quantity}")
            }
            Self::OrderPlaced { .. } => {
                "Thank you for your sustainable purchase! Your order is on its way.".to_string()
            }
            Self::RewardClaimed { reward, cost } => {
                format!("You redeemed {reward} for {cost} EcoPoints")
            }
        }
    }
}

/// Receives notifications. Implementations must not block.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            title = notification.title(),
            description = %notification.description(),
            "Notification"
        );
    }
}

/// Forwards notifications to a channel consumed by the UI.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver the UI should drain.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // A closed receiver means the UI has gone away; nothing to tell.
        if self.tx.send(notification).is_err() {
            tracing::debug!("Notification receiver dropped");
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Notification::AddedToCart {
            product: "Solar Power Bank".to_string(),
        });
        notifier.notify(Notification::QuantityUpdated {
            product: "Solar Power Bank".to_string(),
            quantity: 2,
        });

        assert_eq!(rx.try_recv().unwrap().title(), "Added to Cart!");
        let second = rx.try_recv().unwrap();
        assert_eq!(
            second.description(),
            "Solar Power Bank quantity increased to 2"
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_notifier_tolerates_closed_receiver() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify(Notification::OrderPlaced {
            total: Price::ZERO,
            eco_points: 0,
        });
    }

    #[test]
    fn test_serialized_shape_is_tagged() {
        let json = serde_json::to_value(Notification::RewardClaimed {
            reward: "Plant a Tree".to_string(),
            cost: 200,
        })
        .unwrap();
        assert_eq!(json["kind"], "reward_claimed");
        assert_eq!(json["cost"], 200);
    }
}
