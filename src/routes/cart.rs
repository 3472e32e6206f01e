//! Cart routes — line items, quantities, totals.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::routes::Mutation;
use crate::routes::session::ShopSession;
use crate::services::cart::{Cart, CartItem, MAX_QUANTITY};
use crate::services::money::Cents;

#[derive(Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub price: Cents,
    pub price_label: String,
    pub quantity: u32,
    pub image: String,
    pub subtotal: Cents,
    pub subtotal_label: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        let subtotal = item.subtotal();
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            price_label: item.price.label(),
            quantity: item.quantity,
            image: item.image.clone(),
            subtotal,
            subtotal_label: subtotal.label(),
        }
    }
}

/// Cart panel contents with derived count and total.
#[derive(Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub total: Cents,
    pub total_label: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total = cart.total();
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            total,
            total_label: total.label(),
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/cart`
pub async fn get_cart(session: ShopSession) -> Json<CartView> {
    let shop = session.lock().await;
    Json(CartView::from(shop.cart()))
}

#[derive(Deserialize)]
pub struct AddItemBody {
    pub product_id: String,
}

/// `POST /api/cart/items` — add one unit. Unknown products are a no-op.
pub async fn add_item(session: ShopSession, Json(body): Json<AddItemBody>) -> Json<Mutation<CartView>> {
    let mut shop = session.lock().await;
    let notification = shop.add_to_cart(&body.product_id);
    Json(Mutation::new(CartView::from(shop.cart()), notification))
}

/// Exactly one of `quantity` (absolute, at most `MAX_QUANTITY`) or `delta`
/// (relative, clamped to 0..=`MAX_QUANTITY`).
#[derive(Deserialize)]
pub struct UpdateItemBody {
    pub quantity: Option<u32>,
    pub delta: Option<i64>,
}

/// `PATCH /api/cart/items/:id` — set or step a line's quantity. Reaching
/// zero removes the line. An absolute quantity above the cap is 422.
pub async fn update_item(
    session: ShopSession,
    Path(product_id): Path<String>,
    Json(body): Json<UpdateItemBody>,
) -> Result<Json<Mutation<CartView>>, StatusCode> {
    if body.quantity.is_some_and(|q| q > MAX_QUANTITY) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut shop = session.lock().await;
    let notification = match (body.quantity, body.delta) {
        (Some(quantity), None) => shop.update_quantity(&product_id, quantity),
        (None, Some(delta)) => shop.adjust_quantity(&product_id, delta),
        _ => return Err(StatusCode::BAD_REQUEST),
    };
    Ok(Json(Mutation::new(CartView::from(shop.cart()), notification)))
}

/// `DELETE /api/cart/items/:id` — idempotent; a second delete is silent.
pub async fn remove_item(session: ShopSession, Path(product_id): Path<String>) -> Json<Mutation<CartView>> {
    let mut shop = session.lock().await;
    let notification = shop.remove_from_cart(&product_id);
    Json(Mutation::new(CartView::from(shop.cart()), notification))
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
