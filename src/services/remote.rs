//! Remote service capability — the seam for a future commerce backend.
//!
//! DESIGN
//! ======
//! Sign-in, registration, payment, and profile saves are the operations a
//! real backend would own. They go through the `RemoteService` trait so the
//! storefront never knows which implementation answers. `PlaceholderRemote`
//! accepts everything and reports `Ack::Simulated`; the storefront words its
//! notifications accordingly. A real backend returns `Ack::Committed`.

use serde::Serialize;
use tracing::info;

use super::checkout::PaymentMethod;
use super::money::Cents;
use super::profile::Profile;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The backend could not be reached.
    #[error("remote service unavailable: {0}")]
    Unavailable(String),
    /// The backend answered and refused the request (bad credentials,
    /// declined payment).
    #[error("remote service rejected request: {0}")]
    Rejected(String),
}

/// How the remote side handled a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ack {
    /// Accepted without doing anything; no backend is wired in.
    Simulated,
    /// Processed by a real backend.
    Committed,
}

pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct PaymentRequest {
    pub method: PaymentMethod,
    pub total: Cents,
    pub item_count: u32,
}

#[async_trait::async_trait]
pub trait RemoteService: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Ack, RemoteError>;

    async fn register(&self, registration: &Registration) -> Result<Ack, RemoteError>;

    async fn submit_payment(&self, payment: &PaymentRequest) -> Result<Ack, RemoteError>;

    async fn save_profile(&self, profile: &Profile) -> Result<Ack, RemoteError>;
}

/// Stand-in used until a commerce backend exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRemote;

#[async_trait::async_trait]
impl RemoteService for PlaceholderRemote {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Ack, RemoteError> {
        info!(email = %credentials.email, "sign-in simulated; no auth backend configured");
        Ok(Ack::Simulated)
    }

    async fn register(&self, registration: &Registration) -> Result<Ack, RemoteError> {
        info!(email = %registration.email, "registration simulated; no auth backend configured");
        Ok(Ack::Simulated)
    }

    async fn submit_payment(&self, payment: &PaymentRequest) -> Result<Ack, RemoteError> {
        info!(
            method = payment.method.label(),
            total = %payment.total,
            items = payment.item_count,
            "payment simulated; no payment backend configured"
        );
        Ok(Ack::Simulated)
    }

    async fn save_profile(&self, profile: &Profile) -> Result<Ack, RemoteError> {
        info!(email = %profile.email, "profile save simulated; no profile backend configured");
        Ok(Ack::Simulated)
    }
}
