//! Category and text filtering over a product list.
//!
//! Filtering is a pure projection: it never mutates the catalog and is
//! recomputed on every read. The catalog is small enough that no memo is
//! kept between requests.

use serde::{Deserialize, Serialize};

use super::catalog::{Category, Product};

/// Active filter for one storefront session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub category: Category,
    pub search: String,
}

impl ProductFilter {
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        filter_products(products, self.category, &self.search)
    }
}

/// Category match first, then case-insensitive substring match on name or
/// description. `Category::All` and an empty search each pass everything.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], category: Category, search: &str) -> Vec<&'a Product> {
    let needle = search.to_lowercase();
    products
        .iter()
        .filter(|p| category == Category::All || p.category == category)
        .filter(|p| needle.is_empty() || matches_text(p, &needle))
        .collect()
}

fn matches_text(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle) || product.description.to_lowercase().contains(needle)
}
