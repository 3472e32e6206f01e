//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the storefront's JSON API under `/api` plus a liveness
//! probe. Every `/api` route except session start, categories, and help
//! requires the session cookie; handlers lock that one session, run a single
//! storefront operation, and return the recomputed view.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod help;
pub mod profile;
pub mod session;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::notify::Notification;
use crate::state::AppState;

/// A view returned from a mutating request, with the notification the
/// mutation emitted (`null` for silent no-ops).
#[derive(Serialize)]
pub struct Mutation<T: Serialize> {
    #[serde(flatten)]
    pub view: T,
    pub notification: Option<Notification>,
}

impl<T: Serialize> Mutation<T> {
    pub fn new(view: T, notification: Option<Notification>) -> Self {
        Self { view, notification }
    }
}

/// Storefront API routes.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/session", post(session::start_session))
        .route("/api/storefront", get(session::summary))
        .route("/api/notifications", get(session::notifications))
        .route("/api/help", get(help::help))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/products", get(catalog::list_products))
        .route("/api/filter", put(catalog::set_filter))
        .route("/api/products/{id}/favorite", post(catalog::toggle_favorite))
        .route("/api/cart", get(cart::get_cart))
        .route("/api/cart/items", post(cart::add_item))
        .route("/api/cart/items/{id}", patch(cart::update_item).delete(cart::remove_item))
        .route("/api/checkout", get(checkout::get_checkout))
        .route("/api/checkout/open", post(checkout::open))
        .route("/api/checkout/close", post(checkout::close))
        .route("/api/checkout/finalize", post(checkout::finalize))
        .route("/api/checkout/back", post(checkout::back))
        .route("/api/checkout/method", put(checkout::select_method))
        .route("/api/checkout/confirm", post(checkout::confirm))
        .route("/api/auth/submit", post(auth::submit))
        .route("/api/auth/logout", post(auth::logout))
        .route(
            "/api/profile",
            get(profile::get_profile).patch(profile::patch_profile),
        )
        .route("/api/profile/save", post(profile::save_profile))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// TEST SERVER
// =============================================================================
