//! Catalog browsing commands.

use rust_decimal::Decimal;

use planetsmart_core::{EcoBadge, Price};
use planetsmart_storefront::catalog::{
    self, CategoryFilter, ProductQuery, SortKey, previous_purchases, sustainable_alternative,
    sustainable_products,
};

/// Filters as given on the command line.
pub struct ProductArgs {
    pub search: String,
    pub category: CategoryFilter,
    pub price: (Decimal, Decimal),
    pub score: (u8, u8),
    pub badges: Vec<EcoBadge>,
    pub sort: SortKey,
}

impl ProductArgs {
    #[must_use]
    pub fn into_query(self) -> ProductQuery {
        let (min_price, max_price) = self.price;
        let (min_score, max_score) = self.score;
        ProductQuery {
            search_text: self.search,
            category: self.category,
            price_range: Price::new(min_price)..=Price::new(max_price),
            score_range: min_score..=max_score,
            required_badges: self.badges,
            sort: self.sort,
        }
    }
}

/// Print the products matching `query`.
#[allow(clippy::print_stdout)]
pub fn products(query: ProductQuery) {
    let matched = catalog::query(sustainable_products(), &query);
    if matched.is_empty() {
        println!("No products match those filters.");
        return;
    }

    for product in matched {
        let badges: Vec<&str> = product.badges.iter().map(EcoBadge::name).collect();
        println!(
            "#{:<2} {:<30} {:>8}  score {:>3}  impact {:>5.1}  {}★ ({} reviews)  +{} pts  [{}]",
            product.id.as_i64(),
            product.name,
            product.price.display(),
            product.sustainability_score,
            product.impact.score(),
            product.rating,
            product.reviews,
            product.eco_points,
            badges.join(", ")
        );
    }
}

/// Print previous purchases next to their sustainable replacements.
#[allow(clippy::print_stdout)]
pub fn compare(category: CategoryFilter) {
    let items = previous_purchases(category);
    if items.is_empty() {
        println!("No previous purchases in that category.");
        return;
    }

    for item in items {
        println!(
            "{} ({}, score {}, {} pts)",
            item.name, item.price, item.sustainability_score, item.eco_points
        );
        println!("  impact: {}", item.environmental_impact);
        match sustainable_alternative(item) {
            Some(alt) => println!(
                "  switch to: {} ({}, score {}, +{} pts)",
                alt.name, alt.price, alt.sustainability_score, alt.eco_points
            ),
            None => println!("  no sustainable alternative listed"),
        }
    }
}
