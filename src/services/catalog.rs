//! Catalog service — products, categories, and favorite flags.
//!
//! DESIGN
//! ======
//! Every storefront session gets its own copy of the catalog so favorite
//! flags stay per-visitor. Products are never created or destroyed at
//! runtime; the only mutation is the favorite toggle.
//!
//! The seed list is compiled in. `CATALOG_PATH` may point at a YAML file
//! that replaces it at startup; that file is validated once and any problem
//! aborts startup rather than serving a half-loaded catalog.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::money::Cents;

/// Highest unit price a catalog file may set (R$ 100.000,00).
pub const MAX_PRICE: Cents = Cents::new(100_000, 0);

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate product id: {0}")]
    DuplicateId(String),
    #[error("product {id} has rating {rating}, expected 0 to 5")]
    InvalidRating { id: String, rating: f32 },
    #[error("product {id} has price {price} centavos, above the {max} limit")]
    InvalidPrice { id: String, price: u64, max: u64 },
    #[error("product {0} cannot use the \"Todos\" category")]
    AllCategory(String),
    #[error("catalog has no products")]
    Empty,
}

/// Fixed category set. `All` is the distinguished "no filter" category and
/// never appears on a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Todos")]
    All,
    Chocolates,
    Macarons,
    Brigadeiros,
    Bolos,
}

impl Category {
    /// Display order used by the category bar.
    pub const ALL: [Self; 5] = [Self::All, Self::Chocolates, Self::Macarons, Self::Brigadeiros, Self::Bolos];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Todos",
            Self::Chocolates => "Chocolates",
            Self::Macarons => "Macarons",
            Self::Brigadeiros => "Brigadeiros",
            Self::Bolos => "Bolos",
        }
    }

    /// Exact, case-sensitive match against the category labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price in centavos.
    pub price: Cents,
    pub image: String,
    pub category: Category,
    /// Average review score, 0 to 5.
    pub rating: f32,
    #[serde(default)]
    pub favorite: bool,
}

#[derive(Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

// =============================================================================
// CATALOG
// =============================================================================

/// Ordered product list owned by one storefront session.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog after checking ids, ratings, and categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, an id repeats, a rating falls
    /// outside 0..=5, a price exceeds [`MAX_PRICE`], or a product is labelled
    /// with the "Todos" category.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if !(0.0..=5.0).contains(&product.rating) {
                return Err(CatalogError::InvalidRating { id: product.id.clone(), rating: product.rating });
            }
            if product.price > MAX_PRICE {
                return Err(CatalogError::InvalidPrice { id: product.id.clone(), price: product.price.0, max: MAX_PRICE.0 });
            }
            if product.category == Category::All {
                return Err(CatalogError::AllCategory(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// The compiled-in four-product catalog.
    #[must_use]
    pub fn seed() -> Self {
        Self { products: seed_products() }
    }

    /// Parse a `products:` YAML document.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed YAML or any [`Catalog::new`] error.
    pub fn from_yaml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(raw)?;
        Self::new(file.products)
    }

    /// Read and parse a YAML catalog file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise the same
    /// errors as [`Catalog::from_yaml_str`].
    pub fn load_yaml(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Flip one product's favorite flag. Unknown ids change nothing.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<&Product> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        product.favorite = !product.favorite;
        Some(product)
    }

    /// Products currently marked as favorite, in catalog order.
    pub fn favorites(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.favorite)
    }

    #[must_use]
    pub fn favorite_count(&self) -> usize {
        self.favorites().count()
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "Trufas Gourmet".into(),
            description: "Trufas artesanais de chocolate belga com recheios cremosos".into(),
            price: Cents::new(24, 90),
            image: "/images/trufas-gourmet.jpg".into(),
            category: Category::Chocolates,
            rating: 4.9,
            favorite: false,
        },
        Product {
            id: "2".into(),
            name: "Macarons Franceses".into(),
            description: "Macarons coloridos com recheios de frutas e ganache".into(),
            price: Cents::new(32, 90),
            image: "/images/macarons-franceses.jpg".into(),
            category: Category::Macarons,
            rating: 4.8,
            favorite: false,
        },
        Product {
            id: "3".into(),
            name: "Brigadeiros Gourmet".into(),
            description: "Caixa com 12 brigadeiros de sabores especiais".into(),
            price: Cents::new(18, 50),
            image: "/images/brigadeiros-gourmet.jpg".into(),
            category: Category::Brigadeiros,
            rating: 4.7,
            favorite: false,
        },
        Product {
            id: "4".into(),
            name: "Bombons Sortidos".into(),
            description: "Bombons de chocolate ao leite, meio amargo e branco".into(),
            price: Cents::new(29, 90),
            image: "/images/bombons-sortidos.jpg".into(),
            category: Category::Chocolates,
            rating: 4.6,
            favorite: false,
        },
    ]
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
