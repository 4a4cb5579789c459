//! # Cache Configuration
//!
//! Environment-based configuration for the session cache adapter.

use std::env;
use std::time::Duration;

/// Session cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Store connection URL
    pub url: String,

    /// Per-node URLs for keyspace scans; empty means "just the primary"
    pub node_urls: Vec<String>,

    /// Logical database index
    pub database: i64,

    /// Entry expiry in seconds; zero or negative disables expiry
    pub expiry_seconds: i64,

    /// Session identifier scoping all keys; empty disables scoping
    pub session_id: String,

    /// Namespace prefix within the session; empty disables it
    pub namespace: String,
}

impl CacheConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            url: env::var("CACHE_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),

            node_urls: env::var("CACHE_NODE_URLS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),

            database: env::var("CACHE_DATABASE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),

            expiry_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),

            session_id: env::var("CACHE_SESSION_ID").unwrap_or_default(),

            namespace: env::var("CACHE_NAMESPACE").unwrap_or_default(),
        }
    }

    /// Builder-style override for the session identifier.
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.expiry_seconds = seconds;
        self
    }

    /// Entry TTL; `None` when expiry is disabled.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        u64::try_from(self.expiry_seconds)
            .ok()
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }

    /// URLs to scan during session purge, one per store node. Falls back
    /// to the primary URL when no node list is configured.
    #[must_use]
    pub fn scan_urls(&self) -> Vec<String> {
        if self.node_urls.is_empty() {
            vec![self.url.clone()]
        } else {
            self.node_urls.clone()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
