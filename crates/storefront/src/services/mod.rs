//! Business logic services for the storefront session.
//!
//! # Services
//!
//! - `auth` - Identity store (login, signup, logout, restore)
//! - `cart` - Cart lines and derived totals
//! - `checkout` - Two-step checkout over the cart
//! - `points` - `EcoPoints` ledger
//! - `rewards` - Reward catalog and redemption

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod points;
pub mod rewards;
