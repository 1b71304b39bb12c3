//! Product catalog and the catalog query.
//!
//! The catalog is a small, fixed, in-memory list. [`query`] recomputes the
//! full filtered and sorted view on every call; there is no index and no
//! pagination.
//!
//! Filters compose with AND:
//! - search text matches name, description or any tag (case-insensitive)
//! - category is exact, or [`CategoryFilter::All`]
//! - price and sustainability score ranges are inclusive
//! - badges match if the product carries at least one requested badge
//!
//! Sorting is stable, so products with equal keys keep catalog order.

mod comparison;
mod data;

use std::ops::RangeInclusive;

use tracing::instrument;

use planetsmart_core::{Category, EcoBadge, Price, Product, ProductId};

pub use comparison::{ComparisonItem, comparison_items, previous_purchases, sustainable_alternative};
pub use data::sustainable_products;

/// Category filter. `All` bypasses the category check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether `category` passes this filter.
    #[must_use]
    pub fn accepts(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Catalog order.
    Featured,
    /// Ascending price.
    PriceLow,
    /// Descending price.
    PriceHigh,
    /// Descending sustainability score.
    #[default]
    Sustainability,
    /// Descending `trees + water / 10`.
    Impact,
    /// Descending rating.
    Rating,
}

impl SortKey {
    /// Identifier used by the filter sidebar and the CLI.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Sustainability => "sustainability",
            Self::Impact => "impact",
            Self::Rating => "rating",
        }
    }

    fn sort(self, products: &mut [&Product]) {
        match self {
            Self::Featured => {}
            Self::PriceLow => products.sort_by_key(|p| p.price),
            Self::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Sustainability => {
                products.sort_by(|a, b| b.sustainability_score.cmp(&a.sustainability_score));
            }
            Self::Impact => {
                products.sort_by(|a, b| b.impact.score_tenths().cmp(&a.impact.score_tenths()));
            }
            Self::Rating => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "sustainability" => Ok(Self::Sustainability),
            "impact" => Ok(Self::Impact),
            "rating" => Ok(Self::Rating),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

/// Parameters for [`query`].
///
/// The default matches the products page on first load: no search text,
/// all categories, $0-$200, score 0-100, no badges, sorted by
/// sustainability score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub search_text: String,
    pub category: CategoryFilter,
    pub price_range: RangeInclusive<Price>,
    pub score_range: RangeInclusive<u8>,
    pub required_badges: Vec<EcoBadge>,
    pub sort: SortKey,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: CategoryFilter::All,
            price_range: Price::ZERO..=Price::from_cents(20_000),
            score_range: 0..=100,
            required_badges: Vec::new(),
            sort: SortKey::default(),
        }
    }
}

impl ProductQuery {
    /// A query that lets every product through, in catalog order.
    #[must_use]
    pub fn everything() -> Self {
        Self {
            price_range: Price::ZERO..=Price::new(rust_decimal::Decimal::MAX),
            sort: SortKey::Featured,
            ..Self::default()
        }
    }

    /// Whether a single product passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.category.accepts(product.category)
            && self.price_range.contains(&product.price)
            && self.score_range.contains(&product.sustainability_score)
            && self.matches_badges(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        let needle = self.search_text.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
            || product
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }

    fn matches_badges(&self, product: &Product) -> bool {
        self.required_badges.is_empty()
            || self
                .required_badges
                .iter()
                .any(|badge| product.has_badge(*badge))
    }
}

/// Filter and sort `products`.
///
/// Pure: the same inputs always produce the same ordered output.
#[instrument(skip(products), fields(catalog_size = products.len()))]
pub fn query<'a>(products: &'a [Product], query: &ProductQuery) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();
    query.sort.sort(&mut matched);
    tracing::debug!(matched = matched.len(), "Catalog query");
    matched
}

/// Look up a product in the sustainable catalog by ID.
#[must_use]
pub fn find_product(id: ProductId) -> Option<&'static Product> {
    sustainable_products().iter().find(|p| p.id == id)
}
