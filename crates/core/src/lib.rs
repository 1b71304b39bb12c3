//! PlanetSmart Core - Shared domain types.
//!
//! This crate provides the types shared by every PlanetSmart component:
//! - `storefront` - Identity, cart, points and catalog stores
//! - `cli` - Command-line driver for the stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no async runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, prices, products, users and tiers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
