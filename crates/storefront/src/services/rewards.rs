//! Reward catalog and redemption.

use std::sync::LazyLock;

use serde::Serialize;
use thiserror::Error;

use planetsmart_core::{Rarity, RewardId};

use super::points::PointsLedger;

/// Points between milestones on the progress bar.
pub const MILESTONE_STEP: u64 = 500;

/// What a reward gives the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Discount,
    Shipping,
    Impact,
    Product,
    Membership,
    Service,
    Status,
}

/// A redeemable reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reward {
    pub id: RewardId,
    pub title: &'static str,
    pub description: &'static str,
    pub cost: u64,
    pub kind: RewardKind,
    pub rarity: Rarity,
}

/// Reward redemption failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewardError {
    /// The reward is locked at the current balance.
    #[error("need {needed} points, have {balance}")]
    InsufficientPoints { needed: u64, balance: u64 },

    /// No reward with that ID.
    #[error("unknown reward: {0}")]
    UnknownReward(RewardId),
}

static REWARDS: LazyLock<Vec<Reward>> = LazyLock::new(|| {
    [
        (1, "10% Off Coupon", "Get 10% off your next purchase", 100, RewardKind::Discount, Rarity::Common),
        (2, "Free Shipping", "Free shipping on any order", 150, RewardKind::Shipping, Rarity::Common),
        (3, "Plant a Tree", "We'll plant a tree in your name", 200, RewardKind::Impact, Rarity::Uncommon),
        (4, "Eco Starter Kit", "Curated eco-friendly starter pack", 300, RewardKind::Product, Rarity::Uncommon),
        (5, "VIP Membership", "Exclusive access to new products", 500, RewardKind::Membership, Rarity::Rare),
        (6, "Carbon Offset", "Offset 1 ton of CO₂ emissions", 750, RewardKind::Impact, Rarity::Rare),
        (7, "Eco Consultation", "1-hour sustainability consultation", 1000, RewardKind::Service, Rarity::Epic),
        (8, "Solar Panel Discount", "25% off solar panel installation", 1500, RewardKind::Discount, Rarity::Epic),
        (9, "Eco Ambassador", "Become an official PlanetSmart ambassador", 2000, RewardKind::Status, Rarity::Legendary),
    ]
    .into_iter()
    .map(|(id, title, description, cost, kind, rarity)| Reward {
        id: RewardId::new(id),
        title,
        description,
        cost,
        kind,
        rarity,
    })
    .collect()
});

/// All rewards, cheapest first.
#[must_use]
pub fn rewards() -> &'static [Reward] {
    &REWARDS
}

/// Look up a reward.
#[must_use]
pub fn find_reward(id: RewardId) -> Option<&'static Reward> {
    REWARDS.iter().find(|r| r.id == id)
}

/// Whether `balance` unlocks `reward`.
#[must_use]
pub const fn can_claim(reward: &Reward, balance: u64) -> bool {
    balance >= reward.cost
}

/// Spend a reward's cost from `ledger`.
///
/// # Errors
///
/// Returns `RewardError::UnknownReward` if `id` is not in the catalog.
/// Returns `RewardError::InsufficientPoints` if the balance is too low; the
/// ledger is unchanged.
pub fn claim_reward(
    ledger: &mut PointsLedger,
    id: RewardId,
) -> Result<&'static Reward, RewardError> {
    let reward = find_reward(id).ok_or(RewardError::UnknownReward(id))?;
    let balance = ledger.balance();
    if !ledger.spend_points(reward.cost) {
        tracing::warn!(reward_id = %id, needed = reward.cost, balance, "Reward locked");
        return Err(RewardError::InsufficientPoints {
            needed: reward.cost,
            balance,
        });
    }
    tracing::info!(reward_id = %id, cost = reward.cost, remaining = ledger.balance(), "Reward claimed");
    Ok(reward)
}

/// Progress toward the next points milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MilestoneProgress {
    /// Points earned since the last milestone.
    pub current: u64,
    pub target: u64,
}

impl MilestoneProgress {
    #[must_use]
    pub const fn for_balance(points: u64) -> Self {
        Self {
            current: points % MILESTONE_STEP,
            target: MILESTONE_STEP,
        }
    }

    /// Whole percent complete, 0 to 99.
    #[must_use]
    pub const fn percent(&self) -> u64 {
        self.current * 100 / self.target
    }
}
