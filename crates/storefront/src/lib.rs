//! PlanetSmart storefront library.
//!
//! The session-level domain state of the storefront: who is signed in, what
//! is in the cart, how many `EcoPoints` they hold, and what the catalog shows.
//! Everything is storage-agnostic; persistence, the account roster and
//! notifications are injected through traits.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod state;
pub mod storage;

pub use state::Storefront;
