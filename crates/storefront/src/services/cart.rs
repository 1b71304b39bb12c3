//! Cart store.
//!
//! Holds at most one [`CartLine`] per product. Every line has quantity of
//! at least 1: anything that would take a line to zero removes it instead.

use planetsmart_core::{Impact, Price, Product, ProductId};

use crate::models::CartLine;
use crate::notify::{Notification, Notifier};

/// What [`Cart::add_to_cart`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was created with quantity 1.
    Added,
    /// An existing line's quantity was bumped.
    QuantityUpdated { quantity: u32 },
}

/// The session's shopping cart.
#[derive(Debug, Clone)]
pub struct Cart<N> {
    lines: Vec<CartLine>,
    notifier: N,
}

impl<N: Notifier> Cart<N> {
    /// An empty cart reporting to `notifier`.
    #[must_use]
    pub const fn new(notifier: N) -> Self {
        Self {
            lines: Vec::new(),
            notifier,
        }
    }

    /// Add one unit of `product`.
    pub fn add_to_cart(&mut self, product: &Product) -> CartEvent {
        let event = if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            CartEvent::QuantityUpdated {
                quantity: line.quantity,
            }
        } else {
            self.lines.push(CartLine::for_product(product));
            CartEvent::Added
        };

        tracing::debug!(product_id = %product.id, ?event, "Added to cart");
        self.notifier.notify(match event {
            CartEvent::Added => Notification::AddedToCart {
                product: product.name.clone(),
            },
            CartEvent::QuantityUpdated { quantity } => Notification::QuantityUpdated {
                product: product.name.clone(),
                quantity,
            },
        });
        event
    }

    /// Remove the line for `id`, if any.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != id);
        if self.lines.len() != before {
            tracing::debug!(product_id = %id, "Removed from cart");
        }
    }

    /// Set the quantity for `id` exactly. Zero or less removes the line.
    ///
    /// Unknown products are ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
            tracing::debug!(product_id = %id, quantity, "Updated cart quantity");
        }
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Combined impact of everything in the cart.
    #[must_use]
    pub fn total_impact(&self) -> Impact {
        self.lines
            .iter()
            .map(CartLine::line_impact)
            .fold(Impact::default(), |acc, impact| acc + impact)
    }

    /// Points earned by buying everything in the cart.
    #[must_use]
    pub fn total_eco_points(&self) -> u64 {
        self.lines.iter().map(CartLine::line_eco_points).sum()
    }

    /// Total number of units.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in the order products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every line, returning what was there.
    pub fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub(crate) const fn notifier(&self) -> &N {
        &self.notifier
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use planetsmart_core::{Category, ProductId};

    use super::*;
    use crate::notify::ChannelNotifier;

    fn product(id: i64, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents),
            category: Category::Home,
            rating: 4,
            reviews: 0,
            sustainability_score: 80,
            badges: Vec::new(),
            impact: Impact::new(1, 20),
            eco_points: 10,
            tags: Vec::new(),
        }
    }

    fn cart() -> Cart<ChannelNotifier> {
        Cart::new(ChannelNotifier::new().0)
    }

    #[test]
    fn test_repeated_adds_count_up() {
        let mut cart = cart();
        let p = product(1, 1000);
        for n in 1..=5 {
            let event = cart.add_to_cart(&p);
            if n == 1 {
                assert_eq!(event, CartEvent::Added);
            } else {
                assert_eq!(event, CartEvent::QuantityUpdated { quantity: n });
            }
        }
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(p.id).unwrap().quantity, 5);
    }

    #[test]
    fn test_add_notifies() {
        let (notifier, mut rx) = ChannelNotifier::new();
        let mut cart = Cart::new(notifier);
        let p = product(1, 1000);
        cart.add_to_cart(&p);
        cart.add_to_cart(&p);

        assert_eq!(
            rx.try_recv().unwrap(),
            Notification::AddedToCart {
                product: "Product 1".to_string()
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            Notification::QuantityUpdated {
                product: "Product 1".to_string(),
                quantity: 2
            }
        );
    }

    #[test]
    fn test_total() {
        let mut cart = cart();
        let a = product(1, 1000);
        let b = product(2, 500);
        cart.add_to_cart(&a);
        cart.add_to_cart(&a);
        cart.add_to_cart(&b);
        assert_eq!(cart.cart_total(), Price::from_cents(2500));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_remove_is_unconditional() {
        let mut cart = cart();
        let p = product(1, 1000);
        cart.remove_from_cart(p.id);
        cart.add_to_cart(&p);
        cart.add_to_cart(&p);
        cart.remove_from_cart(p.id);
        assert!(cart.line(p.id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let mut cart = cart();
        let p = product(1, 1000);
        cart.add_to_cart(&p);
        cart.update_quantity(p.id, 7);
        assert_eq!(cart.line(p.id).unwrap().quantity, 7);
        cart.update_quantity(p.id, 2);
        assert_eq!(cart.line(p.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_update_quantity_non_positive_removes() {
        let mut cart = cart();
        let a = product(1, 1000);
        let b = product(2, 1000);
        cart.add_to_cart(&a);
        cart.add_to_cart(&b);
        cart.update_quantity(a.id, 0);
        cart.update_quantity(b.id, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut cart = cart();
        cart.update_quantity(ProductId::new(42), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_price_snapshot_and_aggregates() {
        let mut cart = cart();
        let p = product(1, 1000);
        cart.add_to_cart(&p);
        cart.update_quantity(p.id, 3);

        assert_eq!(cart.total_impact(), Impact::new(3, 60));
        assert_eq!(cart.total_eco_points(), 30);
        assert_eq!(cart.line(p.id).unwrap().unit_price, Price::from_cents(1000));
    }

    #[test]
    fn test_take_lines_empties_cart() {
        let mut cart = cart();
        cart.add_to_cart(&product(1, 100));
        let lines = cart.take_lines();
        assert_eq!(lines.len(), 1);
        assert!(cart.is_empty());
    }
}
