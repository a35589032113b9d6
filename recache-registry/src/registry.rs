//! Named cache registry.
//!
//! Owns the name → instance mapping and the instance lifecycle: create
//! (which awaits the initial load), lookup, and destruction. The registry
//! never mediates reads; callers hold [`Cache`] handles directly.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, instrument};

use recache_cache::{Cache, ManagedCache};
use recache_core::config::{validate_name, CacheConfig};
use recache_core::error::{CacheError, Result};
use recache_core::traits::{CacheEvents, NoopEvents, SnapshotLoader};

/// Registry of named cache instances.
///
/// Lookups are lock-free on the underlying concurrent map. Mutations
/// (create/destroy/destroy_all) serialize on an async mutex so a name
/// cannot be raced while a create is awaiting its initial load.
///
/// There is no process-wide singleton: callers construct a registry and
/// pass it around explicitly. Dropping the registry shuts every instance
/// down through [`ManagedCache`]'s own drop.
pub struct CacheRegistry<V> {
    caches: DashMap<String, ManagedCache<V>>,
    mutate: tokio::sync::Mutex<()>,
}

impl<V: Clone + Send + Sync + 'static> CacheRegistry<V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            caches: DashMap::new(),
            mutate: tokio::sync::Mutex::new(()),
        }
    }

    /// Creates and registers a cache, awaiting its full initialization.
    ///
    /// Fails with [`CacheError::AlreadyRegistered`] if the name is taken,
    /// with a validation error for a bad name or TTL, or with the loader's
    /// error if the initial load fails, in which case nothing is
    /// registered.
    pub async fn create(
        &self,
        config: CacheConfig,
        loader: impl SnapshotLoader<V> + 'static,
    ) -> Result<Cache<V>> {
        self.create_with_events(config, loader, Arc::new(NoopEvents))
            .await
    }

    /// Like [`create`](Self::create), with an event sink attached to the
    /// new instance.
    #[instrument(skip_all, fields(cache = %config.name))]
    pub async fn create_with_events(
        &self,
        config: CacheConfig,
        loader: impl SnapshotLoader<V> + 'static,
        events: Arc<dyn CacheEvents<V>>,
    ) -> Result<Cache<V>> {
        let _guard = self.mutate.lock().await;

        let name = config.validate()?;
        if self.caches.contains_key(&name) {
            return Err(CacheError::AlreadyRegistered(name));
        }

        let managed = ManagedCache::initialize(config, loader, events).await?;
        let handle = managed.handle();
        self.caches.insert(name.clone(), managed);
        debug!(cache = %name, "cache registered");
        Ok(handle)
    }

    /// Looks up a registered cache by name.
    ///
    /// Fails with [`CacheError::InvalidName`] for an empty name; an unknown
    /// name is not an error and returns `None`.
    pub fn get(&self, name: &str) -> Result<Option<Cache<V>>> {
        let name = validate_name(name)?;
        Ok(self.caches.get(name.as_str()).map(|entry| entry.handle()))
    }

    /// Shuts down and removes a cache.
    ///
    /// Returns `false` for an unknown name; never an error. The instance is
    /// shut down *before* it is unmapped, so no handle can observe a live
    /// but unregistered cache.
    #[instrument(skip(self))]
    pub async fn destroy(&self, name: &str) -> Result<bool> {
        let _guard = self.mutate.lock().await;

        let name = validate_name(name)?;
        let Some(entry) = self.caches.get(name.as_str()) else {
            return Ok(false);
        };
        entry.shutdown();
        drop(entry);
        self.caches.remove(name.as_str());
        debug!(cache = %name, "cache destroyed");
        Ok(true)
    }

    /// Shuts down and removes every registered cache.
    ///
    /// Safe with zero instances. Afterwards the registry is empty and any
    /// name, including just-destroyed ones, may be registered again.
    pub async fn destroy_all(&self) {
        let _guard = self.mutate.lock().await;
        for entry in self.caches.iter() {
            entry.shutdown();
        }
        self.caches.clear();
        debug!("all caches destroyed");
    }

    /// Number of registered caches.
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// True when no cache is registered.
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Names of all registered caches, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.caches.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl<V: Clone + Send + Sync + 'static> Default for CacheRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}
