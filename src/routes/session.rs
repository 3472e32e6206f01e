//! Session routes — cookie-bound storefront sessions and the header summary.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use tokio::sync::MutexGuard;
use uuid::Uuid;

use crate::services::auth::SignedInUser;
use crate::services::checkout::CheckoutStage;
use crate::services::filter::ProductFilter;
use crate::services::money::Cents;
use crate::services::notify::Notification;
use crate::services::storefront::Storefront;
use crate::state::{AppState, SharedStorefront};

pub const SESSION_COOKIE: &str = "doces_session";

// =============================================================================
// SESSION EXTRACTOR
// =============================================================================

/// Storefront session resolved from the session cookie.
/// Use as a handler parameter to require a live session.
pub struct ShopSession {
    pub id: Uuid,
    storefront: SharedStorefront,
}

impl ShopSession {
    /// Lock this session's storefront and mark it active.
    pub async fn lock(&self) -> MutexGuard<'_, Storefront> {
        let mut shop = self.storefront.lock().await;
        shop.touch();
        shop
    }
}

impl<S> axum::extract::FromRequestParts<S> for ShopSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let id = session_id_from_jar(&jar).ok_or(StatusCode::UNAUTHORIZED)?;
        let app_state = AppState::from_ref(state);
        let storefront = app_state.session(id).await.ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Self { id, storefront })
    }
}

fn session_id_from_jar(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created: bool,
}

/// `POST /api/session` — reuse the caller's live session or start a new one.
pub async fn start_session(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(session_id) = session_id_from_jar(&jar)
        && state.session(session_id).await.is_some()
    {
        return Json(SessionResponse { session_id, created: false }).into_response();
    }

    let session_id = state.open_session().await;
    let max_age = i64::try_from(state.config.session_idle.as_secs()).unwrap_or(i64::MAX);
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(time::Duration::seconds(max_age));

    (StatusCode::CREATED, jar.add(cookie), Json(SessionResponse { session_id, created: true })).into_response()
}

/// Header badge counts and panel state.
#[derive(Serialize)]
pub struct StorefrontSummary {
    pub cart_item_count: u32,
    pub cart_total: Cents,
    pub cart_total_label: String,
    pub favorite_count: usize,
    pub pending_notifications: usize,
    pub filter: ProductFilter,
    pub checkout: CheckoutStage,
    pub user: Option<SignedInUser>,
}

/// `GET /api/storefront` — header summary.
pub async fn summary(session: ShopSession) -> Json<StorefrontSummary> {
    let shop = session.lock().await;
    let total = shop.cart().total();
    Json(StorefrontSummary {
        cart_item_count: shop.cart().item_count(),
        cart_total: total,
        cart_total_label: total.label(),
        favorite_count: shop.favorite_count(),
        pending_notifications: shop.pending_notifications(),
        filter: shop.filter().clone(),
        checkout: shop.checkout().stage(),
        user: shop.user().cloned(),
    })
}

/// `GET /api/notifications` — drain pending notifications, oldest first.
pub async fn notifications(session: ShopSession) -> Json<Vec<Notification>> {
    let mut shop = session.lock().await;
    Json(shop.drain_notifications())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
