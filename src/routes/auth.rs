//! Auth routes — login/register placeholder and sign-out.
//!
//! DESIGN
//! ======
//! A valid form marks the session signed in and tells the client where to
//! go next and how long to wait first. A rejected form returns the status
//! plus the destructive notification the login page shows.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::warn;

use crate::routes::Mutation;
use crate::routes::session::ShopSession;
use crate::services::auth::{self, AuthError, AuthForm, Redirect, SignedInUser};
use crate::services::notify::Notification;
use crate::state::AppState;

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: Option<SignedInUser>,
    pub redirect: Redirect,
    pub notification: Notification,
}

#[derive(Serialize)]
pub struct AuthRejection {
    pub error: String,
    pub notification: Notification,
}

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::MissingField(_) | AuthError::PasswordMismatch => StatusCode::UNPROCESSABLE_ENTITY,
        AuthError::Remote(_) => StatusCode::BAD_GATEWAY,
    }
}

/// `POST /api/auth/submit` — validate a login or registration form.
pub async fn submit(State(state): State<AppState>, session: ShopSession, Json(form): Json<AuthForm>) -> Response {
    let mut shop = session.lock().await;
    match shop.submit_auth(&form, state.remote.as_ref()).await {
        Ok(notification) => {
            let redirect = Redirect {
                path: state.config.login_redirect_path.clone(),
                after_ms: state.config.login_redirect_delay_ms,
            };
            Json(AuthResponse { user: shop.user().cloned(), redirect, notification }).into_response()
        }
        Err(e) => {
            warn!(session_id = %session.id, mode = ?form.mode, error = %e, "auth form rejected");
            let body = AuthRejection { error: e.to_string(), notification: auth::rejection_notification(&e) };
            (auth_error_to_status(&e), Json(body)).into_response()
        }
    }
}

#[derive(Serialize)]
pub struct SignedOut {
    pub signed_in: bool,
}

/// `POST /api/auth/logout` — silent when nobody is signed in.
pub async fn logout(session: ShopSession) -> Json<Mutation<SignedOut>> {
    let mut shop = session.lock().await;
    let notification = shop.sign_out();
    Json(Mutation::new(SignedOut { signed_in: false }, notification))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
