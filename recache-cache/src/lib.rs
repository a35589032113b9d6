//! # Recache Cache
//!
//! The self-refreshing cache instance: one data snapshot, one TTL timer,
//! and the fresh/outdated state machine.
//!
//! Two handle types split the surface in two tiers:
//!
//! - [`Cache`]: the public read/refresh handle, cheap to clone
//! - [`ManagedCache`]: the owning handle with the shutdown capability,
//!   normally held by a `recache-registry` registry
//!
//! ## Example
//!
//! ```rust,ignore
//! use recache_cache::ManagedCache;
//! use recache_core::{CacheConfig, NoopEvents};
//!
//! let managed = ManagedCache::initialize(
//!     CacheConfig::new("rates").ttl_ms(60_000),
//!     fetch_rates,
//!     Arc::new(NoopEvents),
//! )
//! .await?;
//!
//! let cache = managed.handle();
//! let value = cache.get("EUR")?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{Cache, ManagedCache, MaybeStale};
