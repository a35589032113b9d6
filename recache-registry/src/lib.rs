//! # Recache Registry
//!
//! Lifecycle management for named cache instances.
//!
//! A [`CacheRegistry`] maps names to live cache instances. Creation runs
//! the instance's initial load before the name becomes visible; destruction
//! shuts the instance down before the name is released. Reads never go
//! through the registry; callers keep the `Cache` handle returned by
//! [`CacheRegistry::create`] or [`CacheRegistry::get`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use recache_core::CacheConfig;
//! use recache_registry::CacheRegistry;
//!
//! let registry = CacheRegistry::new();
//! let rates = registry
//!     .create(CacheConfig::new("rates").ttl_ms(60_000), fetch_rates)
//!     .await?;
//!
//! assert_eq!(rates.get("EUR")?, Some(1.08));
//! registry.destroy("rates").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod registry;

pub use registry::CacheRegistry;

// Re-export the handle types callers hold after create/get
pub use recache_cache::{Cache, MaybeStale};
