//! Checkout routes — cart panel stage and payment method selection.
//!
//! ERROR HANDLING
//! ==============
//! Rejected transitions leave the stage untouched and map to a status code
//! via `checkout_error_to_status`. No order is created on confirm.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::routes::Mutation;
use crate::routes::cart::CartView;
use crate::routes::session::ShopSession;
use crate::services::checkout::{CheckoutError, CheckoutStage, PaymentMethod};
use crate::services::storefront::Storefront;
use crate::state::AppState;

#[derive(Serialize)]
pub struct PaymentMethodView {
    pub id: PaymentMethod,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct CheckoutView {
    #[serde(flatten)]
    pub stage: CheckoutStage,
    pub payment_methods: Vec<PaymentMethodView>,
    pub cart: CartView,
}

fn checkout_view(shop: &Storefront) -> CheckoutView {
    CheckoutView {
        stage: shop.checkout().stage(),
        payment_methods: PaymentMethod::ALL
            .into_iter()
            .map(|id| PaymentMethodView { id, label: id.label() })
            .collect(),
        cart: CartView::from(shop.cart()),
    }
}

pub(crate) fn checkout_error_to_status(err: &CheckoutError) -> StatusCode {
    match err {
        CheckoutError::InvalidTransition { .. } | CheckoutError::CartEmpty => StatusCode::CONFLICT,
        CheckoutError::NoPaymentMethod => StatusCode::UNPROCESSABLE_ENTITY,
        CheckoutError::Remote(_) => StatusCode::BAD_GATEWAY,
    }
}

fn reject(session: &ShopSession, err: &CheckoutError) -> StatusCode {
    warn!(session_id = %session.id, error = %err, "checkout rejected");
    checkout_error_to_status(err)
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/checkout`
pub async fn get_checkout(session: ShopSession) -> Json<CheckoutView> {
    let shop = session.lock().await;
    Json(checkout_view(&shop))
}

/// `POST /api/checkout/open` — show the cart panel.
pub async fn open(session: ShopSession) -> Json<CheckoutView> {
    let mut shop = session.lock().await;
    shop.open_cart();
    Json(checkout_view(&shop))
}

/// `POST /api/checkout/close` — hide the cart panel from any stage.
pub async fn close(session: ShopSession) -> Json<CheckoutView> {
    let mut shop = session.lock().await;
    shop.close_cart();
    Json(checkout_view(&shop))
}

/// `POST /api/checkout/finalize` — move to payment method selection.
pub async fn finalize(session: ShopSession) -> Result<Json<CheckoutView>, StatusCode> {
    let mut shop = session.lock().await;
    shop.finalize_checkout().map_err(|e| reject(&session, &e))?;
    Ok(Json(checkout_view(&shop)))
}

/// `POST /api/checkout/back`
pub async fn back(session: ShopSession) -> Result<Json<CheckoutView>, StatusCode> {
    let mut shop = session.lock().await;
    shop.checkout_back().map_err(|e| reject(&session, &e))?;
    Ok(Json(checkout_view(&shop)))
}

#[derive(Deserialize)]
pub struct SelectMethodBody {
    pub method: PaymentMethod,
}

/// `PUT /api/checkout/method`
pub async fn select_method(
    session: ShopSession,
    Json(body): Json<SelectMethodBody>,
) -> Result<Json<CheckoutView>, StatusCode> {
    let mut shop = session.lock().await;
    shop.select_payment(body.method).map_err(|e| reject(&session, &e))?;
    Ok(Json(checkout_view(&shop)))
}

/// `POST /api/checkout/confirm` — hand the payment to the remote service and
/// close the panel. The cart is kept.
pub async fn confirm(
    State(state): State<AppState>,
    session: ShopSession,
) -> Result<Json<Mutation<CheckoutView>>, StatusCode> {
    let mut shop = session.lock().await;
    let notification = shop
        .confirm_checkout(state.remote.as_ref())
        .await
        .map_err(|e| reject(&session, &e))?;
    Ok(Json(Mutation::new(checkout_view(&shop), Some(notification))))
}

#[cfg(test)]
#[path = "checkout_test.rs"]
mod tests;
