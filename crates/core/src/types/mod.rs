//! Core types for PlanetSmart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use email::{Email, EmailError, EmailMatching};
pub use id::*;
pub use price::Price;
pub use product::{Category, EcoBadge, Impact, Product};
pub use status::*;
pub use user::{User, UserStats};
