//! Cart line model.

use serde::{Deserialize, Serialize};

use planetsmart_core::{Impact, Price, Product, ProductId};

/// One product in the cart.
///
/// Price, impact and points are snapshotted when the product is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub impact: Impact,
    pub eco_points: u32,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// A new line with quantity 1.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            impact: product.impact,
            eco_points: product.eco_points,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// Impact of every unit on this line.
    #[must_use]
    pub const fn line_impact(&self) -> Impact {
        self.impact.times(self.quantity)
    }

    /// Points earned by every unit on this line.
    #[must_use]
    pub fn line_eco_points(&self) -> u64 {
        u64::from(self.eco_points) * u64::from(self.quantity)
    }
}
