//! Status enums for members and rewards.

use serde::{Deserialize, Serialize};

/// Loyalty tier shown on a member's profile.
///
/// Serialized using the human-readable label stored on the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum MembershipTier {
    /// Every new account starts here.
    #[default]
    #[serde(rename = "Eco Starter")]
    EcoStarter,
    #[serde(rename = "Eco Explorer")]
    EcoExplorer,
    #[serde(rename = "Eco Champion")]
    EcoChampion,
    #[serde(rename = "Eco Master")]
    EcoMaster,
}

impl MembershipTier {
    /// The label shown in the UI and stored on the user record.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::EcoStarter => "Eco Starter",
            Self::EcoExplorer => "Eco Explorer",
            Self::EcoChampion => "Eco Champion",
            Self::EcoMaster => "Eco Master",
        }
    }
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MembershipTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Eco Starter" => Ok(Self::EcoStarter),
            "Eco Explorer" => Ok(Self::EcoExplorer),
            "Eco Champion" => Ok(Self::EcoChampion),
            "Eco Master" => Ok(Self::EcoMaster),
            _ => Err(format!("invalid membership tier: {s}")),
        }
    }
}

/// How rare a reward is. Rarer rewards cost more points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Common => write!(f, "common"),
            Self::Uncommon => write!(f, "uncommon"),
            Self::Rare => write!(f, "rare"),
            Self::Epic => write!(f, "epic"),
            Self::Legendary => write!(f, "legendary"),
        }
    }
}
