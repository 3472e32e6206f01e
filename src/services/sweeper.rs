//! Session sweeper — background eviction of idle storefront sessions.
//!
//! DESIGN
//! ======
//! Sessions live only in memory. A background task wakes every
//! `sweep_interval`, and drops sessions whose last request is older than
//! `session_idle`. A session whose mutex is held is mid-request and is
//! skipped for this round.

use std::time::Instant;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::state::AppState;

/// Spawn the background sweeper task. Returns a handle for shutdown.
pub fn spawn_session_sweeper(state: AppState) -> JoinHandle<()> {
    let interval = state.config.sweep_interval;
    info!(
        sweep_interval_secs = interval.as_secs(),
        session_idle_secs = state.config.session_idle.as_secs(),
        "session sweeper configured"
    );
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            sweep_idle_sessions(&state, Instant::now()).await;
        }
    })
}

/// Evict sessions idle longer than the configured limit as of `now`.
/// Returns how many were evicted.
pub async fn sweep_idle_sessions(state: &AppState, now: Instant) -> usize {
    let idle_limit = state.config.session_idle;
    let mut sessions = state.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, storefront| match storefront.try_lock() {
        Ok(shop) => shop.idle_for(now) <= idle_limit,
        Err(_) => true,
    });
    let evicted = before - sessions.len();
    if evicted > 0 {
        info!(evicted, live = sessions.len(), "evicted idle storefront sessions");
    }
    evicted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_helpers;
    use std::time::Duration;

    #[tokio::test]
    async fn fresh_sessions_survive_sweep() {
        let state = test_helpers::test_app_state();
        state.open_session().await;
        assert_eq!(sweep_idle_sessions(&state, Instant::now()).await, 0);
        assert_eq!(state.sessions.read().await.len(), 1);
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted() {
        let state = test_helpers::test_app_state();
        let id = state.open_session().await;
        let later = Instant::now() + state.config.session_idle + Duration::from_secs(1);
        assert_eq!(sweep_idle_sessions(&state, later).await, 1);
        assert!(state.session(id).await.is_none());
    }

    #[tokio::test]
    async fn busy_sessions_are_skipped() {
        let state = test_helpers::test_app_state();
        let id = state.open_session().await;
        let shop = state.session(id).await.unwrap();
        let _guard = shop.lock().await;

        let later = Instant::now() + state.config.session_idle + Duration::from_secs(1);
        assert_eq!(sweep_idle_sessions(&state, later).await, 0);
        assert!(state.session(id).await.is_some());
    }
}
