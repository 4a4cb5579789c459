//! # Adapter Factory
//!
//! Owns the store connection lifecycle and constructs configured
//! [`SessionCache`] adapters.

use redis::aio::ConnectionManager;
use redis::{Client, IntoConnectionInfo};

use crate::adapter::SessionCache;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::key::KeyEncoder;

/// Factory holding the open connection(s) behind every adapter it
/// hands out. Dropping (or [`Self::close`]-ing) the factory releases
/// the connections exactly once; adapters already handed out keep
/// their cloned handles alive independently.
pub struct CacheFactory {
    conn: ConnectionManager,
    scan_conns: Vec<ConnectionManager>,
    config: CacheConfig,
}

impl std::fmt::Debug for CacheFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheFactory")
            .field("scan_conns", &self.scan_conns.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CacheFactory {
    /// Validate the configuration, connect to the store, and select
    /// the configured logical database.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] before any connection attempt
    /// when the connection URL is empty, and [`CacheError::Store`]
    /// when the store cannot be reached.
    pub async fn connect(config: CacheConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(CacheError::Config(
                "store connection URL is empty".to_string(),
            ));
        }

        let conn = open_managed(&config.url, config.database).await?;

        let mut scan_conns = Vec::new();
        for url in config.scan_urls() {
            if url == config.url {
                scan_conns.push(conn.clone());
            } else {
                scan_conns.push(open_managed(&url, config.database).await?);
            }
        }

        tracing::debug!(
            url = %config.url,
            nodes = scan_conns.len(),
            database = config.database,
            "Connected session cache"
        );

        Ok(Self {
            conn,
            scan_conns,
            config,
        })
    }

    /// Construct an adapter bound to this factory's connection and the
    /// configured session identifier, namespace prefix, and expiry.
    #[must_use]
    pub fn adapter(&self) -> SessionCache {
        let encoder = KeyEncoder::new(&self.config.session_id, &self.config.namespace);
        SessionCache::new(
            self.conn.clone(),
            self.scan_conns.clone(),
            encoder,
            self.config.ttl(),
        )
    }

    /// The configuration this factory was built from.
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Release the connections. Consumes the factory, so a second
    /// release is unrepresentable; dropping without calling this is
    /// equivalent.
    pub fn close(self) {
        drop(self);
    }
}

/// Open a managed connection to `url`, pinned to the given logical
/// database.
async fn open_managed(url: &str, database: i64) -> Result<ConnectionManager> {
    let mut info = url.into_connection_info()?;
    info.redis.db = database;
    let client = Client::open(info)?;
    let conn = ConnectionManager::new(client).await?;

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> CacheConfig {
        CacheConfig {
            url: url.to_string(),
            node_urls: Vec::new(),
            database: 0,
            expiry_seconds: 0,
            session_id: String::new(),
            namespace: String::new(),
        }
    }

    #[tokio::test]
    async fn test_empty_url_is_config_error() {
        let err = CacheFactory::connect(config_with_url("")).await.unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
    }

    #[tokio::test]
    async fn test_blank_url_is_config_error() {
        let err = CacheFactory::connect(config_with_url("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
    }

    #[tokio::test]
    async fn test_malformed_url_is_store_error() {
        let err = CacheFactory::connect(config_with_url("not-a-url"))
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::Store(_)));
    }
}
