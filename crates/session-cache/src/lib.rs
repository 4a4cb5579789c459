//! # Session Cache Library
//!
//! Session-scoped caching adapter over Redis. Every key written through
//! an adapter is qualified by a session identifier and an optional
//! namespace prefix, so all of a session's entries can be purged in one
//! bulk operation.
//!
//! ```text
//! caller ──► SessionCache ──► Redis
//!              │  encodes key (session_namespace_key)
//!              │  serializes value (JSON; absent → "")
//!              └─ remove_session_data: SCAN <session>* per node, bulk DEL
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use session_cache::{CacheConfig, CacheFactory};
//!
//! let config = CacheConfig::from_env()
//!     .with_session("abc123")
//!     .with_expiry_seconds(60);
//!
//! let factory = CacheFactory::connect(config).await?;
//! let cache = factory.adapter();
//!
//! cache.set("cart", Some(&cart)).await?;
//! let cart: Option<Cart> = cache.get("cart").await?;
//! cache.remove_session_data().await?;
//! ```
//!
//! The adapter is stateless beyond its configuration; expiry is handled
//! entirely by the store, and the factory owns the connection lifetime.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod codec;
pub mod config;
pub mod error;
pub mod factory;
pub mod key;

// Re-export commonly used types
pub use adapter::SessionCache;
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use factory::CacheFactory;
pub use key::KeyEncoder;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
