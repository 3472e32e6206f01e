//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the catalog template, the remote service, and a map of live
//! storefront sessions. Each session sits behind its own mutex so one
//! shopper's events are applied strictly in order while other sessions
//! proceed independently. The map lock is held only to look up, insert, or
//! evict sessions, never across a storefront operation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::services::catalog::Catalog;
use crate::services::remote::RemoteService;
use crate::services::storefront::Storefront;

/// One session's storefront, lockable independently of the session map.
pub type SharedStorefront = Arc<Mutex<Storefront>>;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, SharedStorefront>>>,
    /// Catalog each new session starts from.
    pub catalog: Arc<Catalog>,
    pub remote: Arc<dyn RemoteService>,
    pub config: Arc<StoreConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: StoreConfig, catalog: Catalog, remote: Arc<dyn RemoteService>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            catalog: Arc::new(catalog),
            remote,
            config: Arc::new(config),
        }
    }

    /// Create a fresh storefront session seeded from the catalog template.
    pub async fn open_session(&self) -> Uuid {
        let session_id = Uuid::new_v4();
        let storefront = Storefront::new(Catalog::clone(&self.catalog), self.config.notification_backlog);
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id, Arc::new(Mutex::new(storefront)));
        info!(%session_id, live = sessions.len(), "storefront session opened");
        session_id
    }

    pub async fn session(&self, session_id: Uuid) -> Option<SharedStorefront> {
        self.sessions.read().await.get(&session_id).cloned()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
