//! Member profile types.
//!
//! A [`User`] is the public part of an account: everything except the
//! password. It is what the session holds and what gets persisted between
//! runs, serialized in the same camelCase shape the web client stores.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Email, MembershipTier, UserId};

/// Badge awarded to every new account.
pub const NEWCOMER_BADGE: &str = "Newcomer";

/// Favorite category shown until a member has ordered anything.
pub const DEFAULT_FAVORITE_CATEGORY: &str = "General";

/// Lifetime statistics for a member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_orders: u32,
    pub total_spent: Decimal,
    pub trees_saved: u32,
    /// Liters.
    pub water_saved: u32,
    /// Kilograms of CO2.
    pub carbon_offset: u32,
}

/// A storefront member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// `EcoPoints` balance as of the last time the record was written.
    pub eco_points: u64,
    pub join_date: NaiveDate,
    #[serde(flatten)]
    pub stats: UserStats,
    pub favorite_category: String,
    #[serde(default)]
    pub last_order: Option<NaiveDate>,
    pub membership_tier: MembershipTier,
    #[serde(default)]
    pub badges: Vec<String>,
}

impl User {
    /// A freshly signed-up member: zeroed stats, starter tier, newcomer badge.
    #[must_use]
    pub fn new_member(id: UserId, name: String, email: Email, join_date: NaiveDate) -> Self {
        Self {
            id,
            name,
            email,
            eco_points: 0,
            join_date,
            stats: UserStats::default(),
            favorite_category: DEFAULT_FAVORITE_CATEGORY.to_owned(),
            last_order: None,
            membership_tier: MembershipTier::EcoStarter,
            badges: vec![NEWCOMER_BADGE.to_owned()],
        }
    }
}
