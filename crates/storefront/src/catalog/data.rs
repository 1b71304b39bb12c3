//! The sustainable product catalog.

use std::sync::LazyLock;

use planetsmart_core::{Category, EcoBadge, Impact, Price, Product, ProductId};

static SUSTAINABLE_PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        product(
            1,
            "Bamboo Toothbrush Set",
            "Biodegradable bamboo toothbrushes with soft bristles",
            2499,
            Category::Personal,
            (5, 234),
            95,
            &[EcoBadge::Organic, EcoBadge::Recycled],
            Impact::new(2, 45),
            50,
            &["bamboo", "toothbrush", "biodegradable", "oral care"],
        ),
        product(
            2,
            "Organic Cotton Tote Bag",
            "Reusable shopping bag made from 100% organic cotton",
            1899,
            Category::Home,
            (4, 156),
            88,
            &[EcoBadge::Organic, EcoBadge::Water],
            Impact::new(1, 120),
            35,
            &["cotton", "tote", "reusable", "shopping", "organic"],
        ),
        product(
            3,
            "Solar Power Bank",
            "Portable solar charger with 20,000mAh capacity",
            8999,
            Category::Tech,
            (5, 89),
            92,
            &[EcoBadge::Recycled],
            Impact::new(5, 200),
            120,
            &["solar", "power bank", "portable", "charger", "renewable"],
        ),
        product(
            4,
            "Beeswax Food Wraps",
            "Reusable food storage wraps made from organic beeswax",
            3299,
            Category::Kitchen,
            (4, 312),
            90,
            &[EcoBadge::Organic],
            Impact::new(3, 80),
            65,
            &["beeswax", "food wrap", "reusable", "storage", "organic"],
        ),
        product(
            5,
            "Recycled Yoga Mat",
            "Non-slip yoga mat made from recycled materials",
            5499,
            Category::Outdoor,
            (5, 178),
            85,
            &[EcoBadge::Recycled, EcoBadge::Water],
            Impact::new(4, 150),
            85,
            &["yoga", "mat", "recycled", "fitness", "non-slip"],
        ),
        product(
            6,
            "Stainless Steel Water Bottle",
            "Insulated water bottle that keeps drinks cold for 24h",
            3999,
            Category::Personal,
            (5, 445),
            93,
            &[EcoBadge::Recycled, EcoBadge::Water],
            Impact::new(2, 300),
            75,
            &["water bottle", "stainless steel", "insulated", "reusable"],
        ),
    ]
});

/// The fixed catalog of sustainable products, in featured order.
#[must_use]
pub fn sustainable_products() -> &'static [Product] {
    &SUSTAINABLE_PRODUCTS
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i64,
    name: &str,
    description: &str,
    price_cents: u32,
    category: Category,
    (rating, reviews): (u8, u32),
    sustainability_score: u8,
    badges: &[EcoBadge],
    impact: Impact,
    eco_points: u32,
    tags: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::from_cents(price_cents),
        category,
        rating,
        reviews,
        sustainability_score,
        badges: badges.to_vec(),
        impact,
        eco_points,
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
    }
}
