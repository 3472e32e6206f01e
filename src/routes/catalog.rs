//! Catalog routes — product grid, category bar, search, favorites.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::routes::Mutation;
use crate::routes::session::ShopSession;
use crate::services::catalog::{Category, Product};
use crate::services::filter::filter_products;
use crate::services::money::Cents;
use crate::services::storefront::Storefront;

#[derive(Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Cents,
    pub price_label: String,
    pub image: String,
    pub category: Category,
    pub rating: f32,
    pub favorite: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            price_label: product.price.label(),
            image: product.image.clone(),
            category: product.category,
            rating: product.rating,
            favorite: product.favorite,
        }
    }
}

#[derive(Serialize)]
pub struct ProductListResponse {
    pub category: Category,
    pub search: String,
    pub products: Vec<ProductView>,
    pub favorite_count: usize,
}

fn list_response(shop: &Storefront, category: Category, search: &str) -> ProductListResponse {
    ProductListResponse {
        category,
        search: search.to_owned(),
        products: filter_products(shop.catalog().products(), category, search)
            .into_iter()
            .map(ProductView::from)
            .collect(),
        favorite_count: shop.favorite_count(),
    }
}

fn parse_category(raw: Option<&str>) -> Result<Option<Category>, StatusCode> {
    raw.map(|label| Category::from_label(label).ok_or(StatusCode::BAD_REQUEST))
        .transpose()
}

/// `GET /api/categories` — category bar labels in display order.
pub async fn list_categories() -> Json<Vec<Category>> {
    Json(Category::ALL.to_vec())
}

#[derive(Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// `GET /api/products` — products through the session filter, optionally
/// overridden per request by `category` and `q`.
pub async fn list_products(
    session: ShopSession,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductListResponse>, StatusCode> {
    let category_override = parse_category(query.category.as_deref())?;
    let shop = session.lock().await;
    let category = category_override.unwrap_or(shop.filter().category);
    let search = query.q.as_deref().unwrap_or(&shop.filter().search);
    Ok(Json(list_response(&shop, category, search)))
}

#[derive(Deserialize)]
pub struct FilterBody {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// `PUT /api/filter` — change the active category and/or search text.
pub async fn set_filter(session: ShopSession, Json(body): Json<FilterBody>) -> Result<Json<ProductListResponse>, StatusCode> {
    let category = parse_category(body.category.as_deref())?;
    let mut shop = session.lock().await;
    shop.set_filter(category, body.search);
    Ok(Json(ProductListResponse {
        category: shop.filter().category,
        search: shop.filter().search.clone(),
        products: shop.visible_products().into_iter().map(ProductView::from).collect(),
        favorite_count: shop.favorite_count(),
    }))
}

#[derive(Serialize)]
pub struct FavoriteResponse {
    pub product: Option<ProductView>,
    pub favorite_count: usize,
}

/// `POST /api/products/:id/favorite` — toggle a favorite. Unknown ids are a
/// no-op with `product: null`.
pub async fn toggle_favorite(session: ShopSession, Path(product_id): Path<String>) -> Json<Mutation<FavoriteResponse>> {
    let mut shop = session.lock().await;
    let notification = shop.toggle_favorite(&product_id);
    let view = FavoriteResponse {
        product: shop.catalog().get(&product_id).map(ProductView::from),
        favorite_count: shop.favorite_count(),
    };
    Json(Mutation::new(view, notification))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
