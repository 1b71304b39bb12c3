//! Product reference data.
//!
//! Products are owned by the catalog and never change for the lifetime of
//! the process.

use core::fmt;
use core::ops::Add;

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Product category used by the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Home,
    Personal,
    Kitchen,
    Clothing,
    Tech,
    Outdoor,
}

impl Category {
    /// All categories, in the order the filter sidebar lists them.
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::Personal,
        Self::Kitchen,
        Self::Clothing,
        Self::Tech,
        Self::Outdoor,
    ];

    /// Identifier used in URLs and on the command line.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Personal => "personal",
            Self::Kitchen => "kitchen",
            Self::Clothing => "clothing",
            Self::Tech => "tech",
            Self::Outdoor => "outdoor",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "Home & Garden",
            Self::Personal => "Personal Care",
            Self::Kitchen => "Kitchen & Dining",
            Self::Clothing => "Eco Fashion",
            Self::Tech => "Green Tech",
            Self::Outdoor => "Outdoor & Sports",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.id() == s)
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

/// Eco certification badge carried by a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcoBadge {
    /// USDA Organic.
    Organic,
    /// Water efficient.
    Water,
    /// Made from recycled materials.
    Recycled,
}

impl EcoBadge {
    /// Human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Organic => "USDA Organic",
            Self::Water => "Water Efficient",
            Self::Recycled => "Recycled Materials",
        }
    }
}

impl fmt::Display for EcoBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Organic => write!(f, "organic"),
            Self::Water => write!(f, "water"),
            Self::Recycled => write!(f, "recycled"),
        }
    }
}

impl std::str::FromStr for EcoBadge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organic" => Ok(Self::Organic),
            "water" => Ok(Self::Water),
            "recycled" => Ok(Self::Recycled),
            _ => Err(format!("invalid badge: {s}")),
        }
    }
}

/// Nominal environmental impact of one unit of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
    /// Trees-equivalent saved.
    pub trees: u32,
    /// Liters of water saved.
    pub water_liters: u32,
}

impl Impact {
    /// Create a new impact figure.
    #[must_use]
    pub const fn new(trees: u32, water_liters: u32) -> Self {
        Self {
            trees,
            water_liters,
        }
    }

    /// Impact of `quantity` units.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self {
            trees: self.trees.saturating_mul(quantity),
            water_liters: self.water_liters.saturating_mul(quantity),
        }
    }

    /// Sort score in tenths: `trees * 10 + water_liters`.
    ///
    /// Orders identically to `trees + water_liters / 10` without floating point.
    #[must_use]
    pub fn score_tenths(&self) -> u64 {
        u64::from(self.trees) * 10 + u64::from(self.water_liters)
    }

    /// Sort score as shown to users: `trees + water_liters / 10`.
    #[must_use]
    pub fn score(&self) -> f64 {
        f64::from(self.trees) + f64::from(self.water_liters) / 10.0
    }
}

impl Add for Impact {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            trees: self.trees.saturating_add(rhs.trees),
            water_liters: self.water_liters.saturating_add(rhs.water_liters),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
    /// Star rating, 0 to 5.
    pub rating: u8,
    pub reviews: u32,
    /// Sustainability score, 0 to 100.
    pub sustainability_score: u8,
    pub badges: Vec<EcoBadge>,
    pub impact: Impact,
    /// `EcoPoints` awarded per unit purchased.
    pub eco_points: u32,
    pub tags: Vec<String>,
}

impl Product {
    /// Whether the product carries the given badge.
    #[must_use]
    pub fn has_badge(&self, badge: EcoBadge) -> bool {
        self.badges.contains(&badge)
    }
}
