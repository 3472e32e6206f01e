//! Service configuration parsed from environment variables.
//!
//! Every key is optional. Malformed numeric or boolean values fall back to
//! their defaults; only a configured catalog file that cannot be loaded is
//! fatal, and that is reported by [`StoreConfig::load_catalog`].

use std::path::PathBuf;
use std::time::Duration;

use crate::services::catalog::{Catalog, CatalogError};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOGIN_REDIRECT_PATH: &str = "/loja";
pub const DEFAULT_LOGIN_REDIRECT_DELAY_MS: u64 = 1000;
pub const DEFAULT_NOTIFICATION_BACKLOG: usize = 20;
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub port: u16,
    /// YAML catalog replacing the compiled-in seed list.
    pub catalog_path: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
    pub login_redirect_path: String,
    pub login_redirect_delay_ms: u64,
    /// Cap on undrained notifications per session.
    pub notification_backlog: usize,
    pub session_idle: Duration,
    pub sweep_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_path: None,
            cookie_secure: false,
            login_redirect_path: DEFAULT_LOGIN_REDIRECT_PATH.to_owned(),
            login_redirect_delay_ms: DEFAULT_LOGIN_REDIRECT_DELAY_MS,
            notification_backlog: DEFAULT_NOTIFICATION_BACKLOG,
            session_idle: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SESSION_SWEEP_INTERVAL_SECS),
        }
    }
}

impl StoreConfig {
    /// Build config from environment variables.
    ///
    /// - `PORT`: listen port (default 3000)
    /// - `CATALOG_PATH`: YAML catalog file
    /// - `COOKIE_SECURE`: `1`/`true`/`yes`/`on` or the negatives (default false)
    /// - `LOGIN_REDIRECT_PATH`: default `/loja`
    /// - `LOGIN_REDIRECT_DELAY_MS`: default 1000
    /// - `NOTIFICATION_BACKLOG`: default 20
    /// - `SESSION_IDLE_SECS`: default 3600
    /// - `SESSION_SWEEP_INTERVAL_SECS`: default 60
    #[must_use]
    pub fn from_env() -> Self {
        let catalog_path = std::env::var("CATALOG_PATH")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);
        let login_redirect_path = std::env::var("LOGIN_REDIRECT_PATH")
            .ok()
            .filter(|raw| raw.starts_with('/'))
            .unwrap_or_else(|| DEFAULT_LOGIN_REDIRECT_PATH.to_owned());

        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            catalog_path,
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(false),
            login_redirect_path,
            login_redirect_delay_ms: env_parse("LOGIN_REDIRECT_DELAY_MS", DEFAULT_LOGIN_REDIRECT_DELAY_MS),
            notification_backlog: env_parse("NOTIFICATION_BACKLOG", DEFAULT_NOTIFICATION_BACKLOG),
            session_idle: Duration::from_secs(env_parse("SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)),
            sweep_interval: Duration::from_secs(
                env_parse("SESSION_SWEEP_INTERVAL_SECS", DEFAULT_SESSION_SWEEP_INTERVAL_SECS).max(1),
            ),
        }
    }

    /// The catalog every new session starts from.
    ///
    /// # Errors
    ///
    /// Returns an error if `CATALOG_PATH` is set and the file is unreadable
    /// or invalid.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::load_yaml(path),
            None => Ok(Catalog::seed()),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
