//! `EcoPoints` ledger for the current session.
//!
//! The balance is seeded from the signed-in user's record whenever the
//! current user changes. Whether later credits and debits are written back
//! to that record is a [`PointsPolicy`] decision made by the session.

use serde::{Deserialize, Serialize};

use planetsmart_core::User;

/// Whether ledger changes are written back to the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointsPolicy {
    /// The balance lives only as long as the session.
    #[default]
    Ephemeral,
    /// Every change is saved to the user record and the persisted snapshot.
    WriteBack,
}

impl std::fmt::Display for PointsPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ephemeral => write!(f, "ephemeral"),
            Self::WriteBack => write!(f, "write-back"),
        }
    }
}

impl std::str::FromStr for PointsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ephemeral" => Ok(Self::Ephemeral),
            "write-back" => Ok(Self::WriteBack),
            _ => Err(format!("invalid points policy: {s}")),
        }
    }
}

/// A non-negative points balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointsLedger {
    balance: u64,
}

impl PointsLedger {
    /// A ledger starting at `balance`.
    #[must_use]
    pub const fn with_balance(balance: u64) -> Self {
        Self { balance }
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Re-seed from the current user, or zero when signed out.
    pub fn sync_with(&mut self, user: Option<&User>) {
        self.balance = user.map_or(0, |u| u.eco_points);
        tracing::debug!(balance = self.balance, "Points ledger seeded");
    }

    /// Credit `amount` points.
    pub const fn add_points(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Debit `amount` points if the balance covers it.
    ///
    /// Returns `false` and leaves the balance untouched otherwise; a debit is
    /// never partially applied.
    #[must_use = "an unchecked spend may have been rejected"]
    pub fn spend_points(&mut self, amount: u64) -> bool {
        match self.balance.checked_sub(amount) {
            Some(remaining) => {
                self.balance = remaining;
                true
            }
            None => {
                tracing::debug!(
                    balance = self.balance,
                    requested = amount,
                    "Insufficient points"
                );
                false
            }
        }
    }

    /// Whether `amount` could be spent right now.
    #[must_use]
    pub const fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use planetsmart_core::{Email, UserId};

    use super::*;

    #[test]
    fn test_spend_rejected_in_full() {
        let mut ledger = PointsLedger::with_balance(100);
        assert!(!ledger.spend_points(150));
        assert_eq!(ledger.balance(), 100);
        assert!(ledger.spend_points(50));
        assert_eq!(ledger.balance(), 50);
    }

    #[test]
    fn test_spend_exact_balance() {
        let mut ledger = PointsLedger::with_balance(75);
        assert!(ledger.spend_points(75));
        assert_eq!(ledger.balance(), 0);
        assert!(!ledger.spend_points(1));
        assert!(ledger.spend_points(0));
    }

    #[test]
    fn test_spend_then_add_restores_balance() {
        for (start, amount) in [(0, 0), (10, 10), (500, 120), (2100, 2000)] {
            let mut ledger = PointsLedger::with_balance(start);
            assert!(ledger.spend_points(amount));
            ledger.add_points(amount);
            assert_eq!(ledger.balance(), start);
        }
    }

    #[test]
    fn test_add_saturates() {
        let mut ledger = PointsLedger::with_balance(u64::MAX - 1);
        ledger.add_points(10);
        assert_eq!(ledger.balance(), u64::MAX);
    }

    #[test]
    fn test_sync_with_user() {
        let mut user = User::new_member(
            UserId::new(1),
            "Ishita".to_string(),
            Email::parse("ishita@gmail.com").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        );
        user.eco_points = 2100;

        let mut ledger = PointsLedger::default();
        ledger.sync_with(Some(&user));
        assert_eq!(ledger.balance(), 2100);
        assert!(ledger.can_afford(2100));
        assert!(!ledger.can_afford(2101));

        ledger.sync_with(None);
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("ephemeral".parse(), Ok(PointsPolicy::Ephemeral));
        assert_eq!("write-back".parse(), Ok(PointsPolicy::WriteBack));
        assert!("always".parse::<PointsPolicy>().is_err());
    }
}
