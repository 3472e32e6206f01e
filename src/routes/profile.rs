//! Profile routes — personal info, order history, favorites tab.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::warn;

use crate::routes::Mutation;
use crate::routes::catalog::ProductView;
use crate::routes::session::ShopSession;
use crate::services::auth::SignedInUser;
use crate::services::money::Cents;
use crate::services::profile::{self, Order, OrderStatus, ProfilePatch};
use crate::services::storefront::Storefront;
use crate::state::AppState;

#[derive(Serialize)]
pub struct OrderView {
    pub id: String,
    pub date: String,
    pub date_label: String,
    pub total: Cents,
    pub total_label: String,
    pub status: OrderStatus,
    pub items: u32,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            date: profile::format_iso_date(order.date),
            date_label: profile::format_br_date(order.date),
            total: order.total,
            total_label: order.total.label(),
            status: order.status,
            items: order.items,
        }
    }
}

#[derive(Serialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub initials: String,
    pub orders: Vec<OrderView>,
    pub favorites: Vec<ProductView>,
    pub user: Option<SignedInUser>,
}

fn profile_view(shop: &Storefront) -> ProfileView {
    let p = shop.profile();
    ProfileView {
        name: p.name.clone(),
        email: p.email.clone(),
        phone: p.phone.clone(),
        birth_date: profile::format_iso_date(p.birth_date),
        initials: p.initials(),
        orders: profile::sample_orders().iter().map(OrderView::from).collect(),
        favorites: shop.catalog().favorites().map(ProductView::from).collect(),
        user: shop.user().cloned(),
    }
}

/// `GET /api/profile`
pub async fn get_profile(session: ShopSession) -> Json<ProfileView> {
    let shop = session.lock().await;
    Json(profile_view(&shop))
}

/// `PATCH /api/profile` — edit personal info. All-or-nothing.
pub async fn patch_profile(session: ShopSession, Json(patch): Json<ProfilePatch>) -> Result<Json<ProfileView>, StatusCode> {
    let mut shop = session.lock().await;
    shop.update_profile(patch).map_err(|e| {
        warn!(session_id = %session.id, error = %e, "profile edit rejected");
        StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(profile_view(&shop)))
}

/// `POST /api/profile/save`
pub async fn save_profile(State(state): State<AppState>, session: ShopSession) -> Result<Json<Mutation<ProfileView>>, StatusCode> {
    let mut shop = session.lock().await;
    let notification = shop.save_profile(state.remote.as_ref()).await.map_err(|e| {
        warn!(session_id = %session.id, error = %e, backend = state.remote.name(), "profile save failed");
        StatusCode::BAD_GATEWAY
    })?;
    Ok(Json(Mutation::new(profile_view(&shop), Some(notification))))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
