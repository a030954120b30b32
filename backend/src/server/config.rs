//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, environment variables prefixed with
//! `STOREFRONT_`, or a configuration file, in that order of precedence.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_ALERT_MARKER_TTL, DEFAULT_VOTE_ALERT_THRESHOLD};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling the restock coordination server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct ServerSettings {
    /// PostgreSQL connection URL for the ledgers and catalogue.
    pub database_url: Option<String>,
    /// Redis connection URL for the vote counter and alert markers.
    pub redis_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Vote count at which the admin is alerted.
    pub vote_alert_threshold: Option<i64>,
    /// Lifetime of the admin alert dedup marker, in seconds.
    pub alert_marker_ttl_secs: Option<u64>,
    /// Whether session cookies carry the `Secure` flag.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Path to the session signing key file.
    pub session_key_file: Option<PathBuf>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured alert threshold, falling back to the default.
    pub fn vote_alert_threshold(&self) -> i64 {
        self.vote_alert_threshold
            .unwrap_or(DEFAULT_VOTE_ALERT_THRESHOLD)
    }

    /// Return the configured marker lifetime, falling back to the default.
    pub fn alert_marker_ttl(&self) -> Duration {
        self.alert_marker_ttl_secs
            .map_or(DEFAULT_ALERT_MARKER_TTL, Duration::from_secs)
    }
}
