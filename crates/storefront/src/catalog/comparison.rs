//! Conventional products used by the "explore your impact" comparison.
//!
//! Each item stands in for something the member bought before and links to
//! the sustainable product that replaces it.

use std::sync::LazyLock;

use serde::Serialize;

use planetsmart_core::{Category, ComparisonItemId, Price, Product, ProductId};

use super::{CategoryFilter, find_product};

/// How many past purchases the comparison view shows.
const PREVIOUS_PURCHASE_LIMIT: usize = 10;

/// A conventional product with a sustainable alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    pub id: ComparisonItemId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub sustainability_score: u8,
    /// Free-text description of the harm done.
    pub environmental_impact: String,
    /// Negative: the points a member forgoes by buying this.
    pub eco_points: i32,
    pub alternative: ProductId,
}

static COMPARISON_ITEMS: LazyLock<Vec<ComparisonItem>> = LazyLock::new(|| {
    vec![
        item(
            101,
            "Plastic Toothbrush 4-Pack",
            "Standard nylon-bristle toothbrushes with plastic handles",
            899,
            Category::Personal,
            12,
            "Each handle takes over 400 years to break down in landfill",
            -20,
            1,
        ),
        item(
            102,
            "Single-Use Plastic Bags (100)",
            "Thin polyethylene grocery bags",
            499,
            Category::Home,
            5,
            "Bags fragment into microplastics that reach waterways",
            -35,
            2,
        ),
        item(
            103,
            "Disposable Power Bank",
            "Non-rechargeable lithium power pack",
            1999,
            Category::Tech,
            18,
            "Lithium cells are rarely recycled and leach heavy metals",
            -50,
            3,
        ),
        item(
            104,
            "Plastic Cling Film Roll",
            "300 ft of PVC food wrap",
            699,
            Category::Home,
            10,
            "PVC film cannot be recycled curbside and releases chlorine when burned",
            -25,
            4,
        ),
        item(
            105,
            "PVC Yoga Mat",
            "Budget exercise mat made from PVC foam",
            2499,
            Category::Outdoor,
            15,
            "PVC production emits dioxins; mats end up in landfill within two years",
            -40,
            5,
        ),
        item(
            106,
            "Bottled Water 24-Pack",
            "Half-liter PET bottles of spring water",
            799,
            Category::Personal,
            8,
            "Producing the bottles uses three times the water they hold",
            -45,
            6,
        ),
    ]
});

/// The fixed catalog of conventional products.
#[must_use]
pub fn comparison_items() -> &'static [ComparisonItem] {
    &COMPARISON_ITEMS
}

/// The member's simulated purchase history, optionally narrowed by category.
#[must_use]
pub fn previous_purchases(category: CategoryFilter) -> Vec<&'static ComparisonItem> {
    comparison_items()
        .iter()
        .take(PREVIOUS_PURCHASE_LIMIT)
        .filter(|item| category.accepts(item.category))
        .collect()
}

/// The sustainable product that replaces `item`, if it is in the catalog.
#[must_use]
pub fn sustainable_alternative(item: &ComparisonItem) -> Option<&'static Product> {
    find_product(item.alternative)
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: i64,
    name: &str,
    description: &str,
    price_cents: u32,
    category: Category,
    sustainability_score: u8,
    environmental_impact: &str,
    eco_points: i32,
    alternative: i64,
) -> ComparisonItem {
    ComparisonItem {
        id: ComparisonItemId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::from_cents(price_cents),
        category,
        sustainability_score,
        environmental_impact: environmental_impact.to_owned(),
        eco_points,
        alternative: ProductId::new(alternative),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_item_has_an_alternative() {
        for item in comparison_items() {
            let alternative = sustainable_alternative(item).unwrap();
            assert!(
                alternative.sustainability_score > item.sustainability_score,
                "{} should be replaced by something greener",
                item.name
            );
        }
    }

    #[test]
    fn test_conventional_items_cost_points() {
        assert!(comparison_items().iter().all(|item| item.eco_points < 0));
    }

    #[test]
    fn test_previous_purchases_by_category() {
        assert_eq!(previous_purchases(CategoryFilter::All).len(), 6);

        let personal = previous_purchases(CategoryFilter::Only(Category::Personal));
        assert_eq!(personal.len(), 2);
        assert!(personal.iter().all(|i| i.category == Category::Personal));

        assert!(previous_purchases(CategoryFilter::Only(Category::Kitchen)).is_empty());
    }
}
