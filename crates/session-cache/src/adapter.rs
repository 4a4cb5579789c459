//! # Session Cache Adapter
//!
//! Typed get/set/remove/exists operations over Redis, with every key
//! qualified by the adapter's session identifier and namespace prefix,
//! plus bulk deletion of all keys under the session.
//!
//! The adapter holds no mutable state of its own: configuration is
//! immutable and connection handles are cloned per call, so a single
//! instance is safe to share across tasks. Eviction is delegated
//! entirely to store-side expiry; session purge is an explicit bulk
//! delete.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;

use crate::codec;
use crate::error::Result;
use crate::key::KeyEncoder;

/// Session-scoped cache adapter bound to one store connection.
#[derive(Clone)]
pub struct SessionCache {
    conn: ConnectionManager,
    scan_conns: Vec<ConnectionManager>,
    encoder: KeyEncoder,
    ttl: Option<Duration>,
}

impl SessionCache {
    /// Create an adapter over an open connection.
    ///
    /// `scan_conns` holds one connection per store node for keyspace
    /// scans during session purge; single-node deployments pass the
    /// primary connection alone.
    #[must_use]
    pub fn new(
        conn: ConnectionManager,
        scan_conns: Vec<ConnectionManager>,
        encoder: KeyEncoder,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            conn,
            scan_conns,
            encoder,
            ttl,
        }
    }

    /// Fully-qualified key for a logical key, as stored.
    #[must_use]
    pub fn qualified_key(&self, key: &str) -> String {
        self.encoder.encode(key)
    }

    // =========================================================================
    // SIMPLE KEY OPERATIONS
    // =========================================================================

    /// Write a value under the adapter's expiry. `None` stores the
    /// empty payload. Returns `true` once the store acknowledges the
    /// write.
    pub async fn set<T: Serialize>(&self, key: &str, value: Option<&T>) -> Result<bool> {
        let full = self.encoder.encode(key);
        let payload = codec::encode(value)?;
        let mut conn = self.conn.clone();

        match self.ttl {
            Some(ttl) => {
                let _: () = conn.set_ex(&full, payload, ttl.as_secs()).await?;
            }
            None => {
                let _: () = conn.set(&full, payload).await?;
            }
        }

        Ok(true)
    }

    /// Read a value. Missing or empty payloads return `Ok(None)`; a
    /// present payload that fails to parse is an error for this call.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let full = self.encoder.encode(key);
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(&full).await?;

        codec::decode(raw)
    }

    /// Whether the key currently exists in the store.
    pub async fn is_set(&self, key: &str) -> Result<bool> {
        let full = self.encoder.encode(key);
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(&full).await?;

        Ok(exists)
    }

    /// Delete the key. Returns `true` only when a key was actually
    /// removed.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        let full = self.encoder.encode(key);
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(&full).await?;

        Ok(deleted > 0)
    }

    // =========================================================================
    // HASH FIELD OPERATIONS
    // =========================================================================

    /// Write a value under a hash field. Fields carry no expiry of
    /// their own; callers wanting expiry manage it on the parent key.
    pub async fn set_hash<T: Serialize>(
        &self,
        key: &str,
        field: &str,
        value: Option<&T>,
    ) -> Result<bool> {
        let full = self.encoder.encode(key);
        let payload = codec::encode(value)?;
        let mut conn = self.conn.clone();

        let _: () = conn.hset(&full, field, payload).await?;

        Ok(true)
    }

    /// Read a hash field, with the same absent/parse semantics as
    /// [`Self::get`].
    pub async fn get_hash<T: DeserializeOwned>(&self, key: &str, field: &str) -> Result<Option<T>> {
        let full = self.encoder.encode(key);
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.hget(&full, field).await?;

        codec::decode(raw)
    }

    /// Whether the hash field currently exists.
    pub async fn is_hash_set(&self, key: &str, field: &str) -> Result<bool> {
        let full = self.encoder.encode(key);
        let mut conn = self.conn.clone();
        let exists: bool = conn.hexists(&full, field).await?;

        Ok(exists)
    }

    /// Delete a hash field. Returns `true` only when the field was
    /// actually removed.
    pub async fn remove_hash(&self, key: &str, field: &str) -> Result<bool> {
        let full = self.encoder.encode(key);
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.hdel(&full, field).await?;

        Ok(deleted > 0)
    }

    // =========================================================================
    // SESSION PURGE
    // =========================================================================

    /// Delete every key under the adapter's session identifier.
    ///
    /// Scans each store node's keyspace for `<sessionId>*` with a
    /// cursor (SCAN, not KEYS), then issues one bulk delete for all
    /// matches. Returns `true` iff the deleted count equals the
    /// matched count; a key expiring between scan and delete reports
    /// `false` rather than raising an error. Vacuously `true` when no
    /// session identifier is configured.
    pub async fn remove_session_data(&self) -> Result<bool> {
        let Some(pattern) = self.encoder.session_pattern() else {
            tracing::debug!("No session identifier configured, nothing to purge");
            return Ok(true);
        };

        // SCAN may repeat a key mid-rehash, and the same key can come
        // back from more than one node; DEL only counts it once.
        let mut matched: HashSet<String> = HashSet::new();
        for node in &self.scan_conns {
            let mut conn = node.clone();
            let mut iter: redis::AsyncIter<'_, String> = conn.scan_match(pattern.as_str()).await?;
            while let Some(key) = iter.next_item().await {
                matched.insert(key);
            }
        }

        tracing::debug!(
            session = self.encoder.session_id(),
            count = matched.len(),
            "Scanned session keyspace"
        );

        if matched.is_empty() {
            return Ok(true);
        }

        let keys: Vec<String> = matched.into_iter().collect();
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(&keys).await?;

        Ok(purge_complete(keys.len(), deleted))
    }
}

/// Whether a session purge succeeded: every matched key must have been
/// deleted. Zero matches is trivially complete; a key expiring between
/// scan and delete makes the purge incomplete.
fn purge_complete(matched: usize, deleted: i64) -> bool {
    deleted == matched as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_complete_with_zero_matches() {
        assert!(purge_complete(0, 0));
    }

    #[test]
    fn test_purge_complete_when_all_deleted() {
        assert!(purge_complete(3, 3));
    }

    #[test]
    fn test_purge_incomplete_when_key_expired_between_scan_and_delete() {
        assert!(!purge_complete(3, 2));
        assert!(!purge_complete(1, 0));
    }
}
