//! Integration tests for catalog queries and product comparison.

#![allow(clippy::unwrap_used)]

use planetsmart_core::{Category, EcoBadge, Price, ProductId};
use planetsmart_storefront::catalog::{
    CategoryFilter, ProductQuery, SortKey, comparison_items, previous_purchases, query,
    sustainable_alternative, sustainable_products,
};

fn ids(query_result: &[&planetsmart_core::Product]) -> Vec<i64> {
    query_result.iter().map(|p| p.id.as_i64()).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_personal_category_from_identifier() {
    let q = ProductQuery {
        category: "personal".parse().unwrap(),
        ..ProductQuery::default()
    };
    let result = query(sustainable_products(), &q);
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|p| p.category == Category::Personal));
}

#[test]
fn test_price_low_on_full_catalog() {
    let q = ProductQuery {
        sort: "price-low".parse().unwrap(),
        ..ProductQuery::everything()
    };
    let result = query(sustainable_products(), &q);
    let cheapest = sustainable_products().iter().map(|p| p.price).min().unwrap();
    assert_eq!(result.len(), sustainable_products().len());
    assert_eq!(result.first().unwrap().price, cheapest);
    assert!(result.windows(2).all(|w| w[0].price <= w[1].price));
}

#[test]
fn test_sort_identifiers_parse() {
    for id in [
        "featured",
        "price-low",
        "price-high",
        "sustainability",
        "impact",
        "rating",
    ] {
        let key: SortKey = id.parse().unwrap();
        assert_eq!(key.to_string(), id);
    }
    assert!("newest".parse::<SortKey>().is_err());
}

// =============================================================================
// Properties
// =============================================================================

fn sample_queries() -> Vec<ProductQuery> {
    let mut queries = Vec::new();
    for sort in [
        SortKey::Featured,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Sustainability,
        SortKey::Impact,
        SortKey::Rating,
    ] {
        for category in [
            CategoryFilter::All,
            CategoryFilter::Only(Category::Personal),
            CategoryFilter::Only(Category::Kitchen),
        ] {
            queries.push(ProductQuery {
                category,
                sort,
                ..ProductQuery::default()
            });
            queries.push(ProductQuery {
                search_text: "re".to_string(),
                category,
                required_badges: vec![EcoBadge::Recycled],
                sort,
                ..ProductQuery::default()
            });
        }
    }
    queries
}

#[test]
fn test_query_is_idempotent() {
    for q in sample_queries() {
        let first = ids(&query(sustainable_products(), &q));
        let second = ids(&query(sustainable_products(), &q));
        assert_eq!(first, second);
    }
}

#[test]
fn test_narrowing_never_grows_results() {
    for q in sample_queries() {
        let base = query(sustainable_products(), &q).len();

        let narrower_price = ProductQuery {
            price_range: Price::from_cents(2000)..=Price::from_cents(6000),
            ..q.clone()
        };
        assert!(query(sustainable_products(), &narrower_price).len() <= base);

        let narrower_score = ProductQuery {
            score_range: 90..=100,
            ..q.clone()
        };
        assert!(query(sustainable_products(), &narrower_score).len() <= base);

        let longer_search = ProductQuery {
            search_text: format!("{}s", q.search_text),
            ..q.clone()
        };
        assert!(query(sustainable_products(), &longer_search).len() <= base);
    }
}

#[test]
fn test_every_sort_returns_same_set() {
    let mut expected = ids(&query(sustainable_products(), &ProductQuery::default()));
    expected.sort_unstable();
    for q in sample_queries()
        .into_iter()
        .filter(|q| q.category == CategoryFilter::All && q.search_text.is_empty())
    {
        let mut got = ids(&query(sustainable_products(), &q));
        got.sort_unstable();
        assert_eq!(got, expected);
    }
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn test_every_comparison_item_has_an_alternative() {
    for item in comparison_items() {
        let alt = sustainable_alternative(item).unwrap();
        assert!(alt.sustainability_score > item.sustainability_score);
        assert!(item.eco_points < 0);
    }
}

#[test]
fn test_previous_purchases_by_category() {
    assert_eq!(
        previous_purchases(CategoryFilter::All).len(),
        comparison_items().len()
    );

    let personal = previous_purchases(CategoryFilter::Only(Category::Personal));
    assert!(!personal.is_empty());
    assert!(personal.iter().all(|i| i.category == Category::Personal));

    let alternatives: Vec<ProductId> = personal.iter().map(|i| i.alternative).collect();
    assert!(alternatives.contains(&ProductId::new(1)));
}
