//! Domain models for the storefront session.
//!
//! - [`cart`] - cart lines snapshotted from catalog products
//! - [`order`] - checkout form and the receipt produced by a completed order

pub mod cart;
pub mod order;

pub use cart::CartLine;
pub use order::{OrderReceipt, PaymentOption, ShippingDetails};
