//! Self-refreshing cache instance.
//!
//! One instance owns a data snapshot, a periodic reload timer, and the
//! fresh/outdated state machine. Reads never block on a reload in flight:
//! they observe whatever snapshot is currently installed. A reload replaces
//! the snapshot wholesale, so readers may see stale data but never torn
//! data.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, instrument, warn};

use recache_core::config::CacheConfig;
use recache_core::error::{CacheError, Result};
use recache_core::traits::{CacheEvents, Snapshot, SnapshotLoader};

/// Value returned by [`Cache::get_unsafe`]: best-effort data plus the trust
/// flag.
#[derive(Clone, Debug, PartialEq)]
pub struct MaybeStale<V> {
    /// Last known value for the key, if any.
    pub value: Option<V>,
    /// True when the snapshot should not be trusted: the last load failed or
    /// the instance has been shut down.
    pub outdated: bool,
}

/// Shared state behind both handle types.
struct CacheState<V> {
    name: String,
    ttl: Duration,
    check_interval: Duration,
    /// Current data set. Swapped as a whole on every successful load.
    snapshot: RwLock<Arc<Snapshot<V>>>,
    /// Stamped at load *start*, before the loader is awaited.
    last_load: Mutex<Option<Instant>>,
    load_count: AtomicU64,
    outdated: AtomicBool,
    /// Set by `refresh()`, consumed by the next load decision.
    forced_pending: AtomicBool,
    closed: AtomicBool,
    /// In-flight marker: holding this gate is what makes a load attempt the
    /// only one. Timer ticks `try_lock` and skip; `refresh()` waits.
    load_gate: tokio::sync::Mutex<()>,
    loader: Box<dyn SnapshotLoader<V>>,
    events: Arc<dyn CacheEvents<V>>,
}

impl<V> CacheState<V> {
    fn should_reload(&self, now: Instant) -> bool {
        if self.forced_pending.load(Ordering::SeqCst) {
            return true;
        }
        match *self.last_load.lock() {
            None => true,
            Some(stamp) => now.duration_since(stamp) > self.ttl,
        }
    }

    /// Runs one load attempt. The caller must hold `load_gate`.
    async fn run_load(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(CacheError::OutOfDate {
                name: self.name.clone(),
            });
        }

        let now = Instant::now();
        let previous = *self.last_load.lock();
        let was_expired = previous.map_or(true, |stamp| now.duration_since(stamp) > self.ttl);
        let count = self.load_count.fetch_add(1, Ordering::SeqCst) + 1;
        // Stamp before awaiting the loader so a timer tick landing mid-load
        // computes expiry from this attempt, not the previous one.
        *self.last_load.lock() = Some(now);
        let was_forced = self.forced_pending.swap(false, Ordering::SeqCst);

        self.events
            .load(&self.name, count, was_forced, now, was_expired);
        debug!(cache = %self.name, count, was_forced, was_expired, "loading snapshot");

        match self.loader.load().await {
            Ok(data) => {
                if self.closed.load(Ordering::SeqCst) {
                    // Shut down while the loader was in flight; the result
                    // must not resurrect the instance.
                    return Err(CacheError::OutOfDate {
                        name: self.name.clone(),
                    });
                }
                *self.snapshot.write() = Arc::new(data);
                self.outdated.store(false, Ordering::SeqCst);
                Ok(())
            }
            Err(err) => {
                self.outdated.store(true, Ordering::SeqCst);
                Err(CacheError::Load(err))
            }
        }
    }

    /// One timer tick: skip when a load is already in flight, otherwise
    /// reload if the TTL has elapsed or a forced refresh is pending.
    async fn tick(&self) {
        let Ok(_gate) = self.load_gate.try_lock() else {
            return;
        };
        if self.closed.load(Ordering::SeqCst) || !self.should_reload(Instant::now()) {
            return;
        }
        if let Err(err) = self.run_load().await {
            // No caller context here; the failure is absorbed into the
            // outdated flag and reported through the sink.
            warn!(cache = %self.name, error = %err, "background reload failed");
            self.events
                .warn(&self.name, &format!("background reload failed: {err}"));
        }
    }
}

/// Cheap-to-clone read/refresh handle to a cache instance.
///
/// This is the public surface: reads and forced refreshes. Shutting the
/// instance down is reserved to [`ManagedCache`].
pub struct Cache<V> {
    state: Arc<CacheState<V>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<V> Cache<V> {
    /// The cache name.
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// The reload cadence.
    pub fn ttl(&self) -> Duration {
        self.state.ttl
    }

    /// Number of load attempts so far, successful or not.
    pub fn load_count(&self) -> u64 {
        self.state.load_count.load(Ordering::SeqCst)
    }

    /// True when the snapshot should not be trusted.
    pub fn is_outdated(&self) -> bool {
        self.state.outdated.load(Ordering::SeqCst)
    }

    /// Number of keys in the current snapshot.
    pub fn len(&self) -> usize {
        self.state.snapshot.read().len()
    }

    /// True when the current snapshot has no keys.
    pub fn is_empty(&self) -> bool {
        self.state.snapshot.read().is_empty()
    }

    /// True when the current snapshot contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.snapshot.read().contains_key(key)
    }

    /// Forces a reload ahead of the TTL and propagates the loader's error.
    ///
    /// If a load is already in flight this waits for it; a load that started
    /// after the refresh was requested satisfies it without a second loader
    /// invocation.
    #[instrument(skip(self), fields(cache = %self.state.name))]
    pub async fn refresh(&self) -> Result<()> {
        let state = &self.state;
        state.events.refresh(
            &state.name,
            state.load_count.load(Ordering::SeqCst),
            *state.last_load.lock(),
        );
        state.forced_pending.store(true, Ordering::SeqCst);

        let _gate = state.load_gate.lock().await;
        if !state.should_reload(Instant::now()) {
            return Ok(());
        }
        state.run_load().await
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.state.name)
            .field("ttl", &self.state.ttl)
            .field("load_count", &self.load_count())
            .field("outdated", &self.is_outdated())
            .finish_non_exhaustive()
    }
}

impl<V: Clone> Cache<V> {
    /// Safe accessor: refuses to hand back data once trust is broken.
    ///
    /// Fails with [`CacheError::OutOfDate`] (code `ERR_CACHE_OUT_OF_DATE`)
    /// without looking at the snapshot when the instance is outdated.
    pub fn get(&self, key: &str) -> Result<Option<V>> {
        if self.is_outdated() {
            return Err(CacheError::OutOfDate {
                name: self.state.name.clone(),
            });
        }
        let value = self.state.snapshot.read().get(key).cloned();
        self.state.events.get(&self.state.name, key, value.as_ref());
        Ok(value)
    }

    /// Best-effort accessor: never fails, flags untrusted data instead.
    pub fn get_unsafe(&self, key: &str) -> MaybeStale<V> {
        let outdated = self.is_outdated();
        if outdated {
            self.state
                .events
                .warn(&self.state.name, "serving potentially outdated data");
        }
        let value = self.state.snapshot.read().get(key).cloned();
        self.state
            .events
            .get_unsafe(&self.state.name, key, value.as_ref());
        MaybeStale { value, outdated }
    }

    /// Defensive copy of the current snapshot.
    ///
    /// No consistency guarantee across calls: a reload may land between two
    /// copies.
    pub fn snapshot_copy(&self) -> Snapshot<V> {
        self.state.snapshot.read().as_ref().clone()
    }
}

/// Owning handle to a cache instance.
///
/// Created by [`ManagedCache::initialize`]; everyone else gets [`Cache`]
/// clones via [`ManagedCache::handle`]. This type carries the management
/// capability: it owns the timer task and is the only way to shut the
/// instance down.
pub struct ManagedCache<V> {
    cache: Cache<V>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<V: Send + Sync + 'static> ManagedCache<V> {
    /// Validates the configuration, runs the initial load, and arms the
    /// periodic reload timer.
    ///
    /// Initialization is fallible: if the first load fails, the loader's
    /// error is returned, no timer is armed, and no instance exists. Later
    /// periodic failures only mark the instance outdated.
    pub async fn initialize(
        config: CacheConfig,
        loader: impl SnapshotLoader<V> + 'static,
        events: Arc<dyn CacheEvents<V>>,
    ) -> Result<Self> {
        let name = config.validate()?;
        let state = Arc::new(CacheState {
            name,
            ttl: Duration::from_millis(config.ttl_ms),
            check_interval: Duration::from_millis(config.check_interval_ms()),
            snapshot: RwLock::new(Arc::new(Snapshot::new())),
            last_load: Mutex::new(None),
            load_count: AtomicU64::new(0),
            outdated: AtomicBool::new(false),
            forced_pending: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            load_gate: tokio::sync::Mutex::new(()),
            loader: Box::new(loader),
            events,
        });

        state.events.init_start(&state.name);
        let started = Instant::now();
        {
            let _gate = state.load_gate.lock().await;
            state.run_load().await?;
        }
        state.events.init_end(&state.name, started.elapsed());
        debug!(cache = %state.name, elapsed = ?started.elapsed(), "cache initialized");

        let timer = tokio::spawn(Self::run_timer(Arc::clone(&state)));
        Ok(Self {
            cache: Cache { state },
            timer: Mutex::new(Some(timer)),
        })
    }

    async fn run_timer(state: Arc<CacheState<V>>) {
        let mut ticker = interval(state.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial load has just
        // happened, so it is a no-op.
        loop {
            ticker.tick().await;
            state.tick().await;
        }
    }
}

impl<V> ManagedCache<V> {
    /// Public read/refresh handle to this instance.
    pub fn handle(&self) -> Cache<V> {
        self.cache.clone()
    }

    /// Stops the reload timer and marks the instance permanently outdated.
    ///
    /// Idempotent. After shutdown the safe accessor always fails and the
    /// best-effort accessor keeps serving the last known, now frozen,
    /// snapshot flagged as outdated.
    pub fn shutdown(&self) {
        let state = &self.cache.state;
        state.closed.store(true, Ordering::SeqCst);
        state.outdated.store(true, Ordering::SeqCst);
        if let Some(timer) = self.timer.lock().take() {
            timer.abort();
            debug!(cache = %state.name, "cache shut down");
        }
    }
}

impl<V> fmt::Debug for ManagedCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedCache")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<V> Drop for ManagedCache<V> {
    fn drop(&mut self) {
        // An abandoned instance must not keep its timer task alive.
        self.shutdown();
    }
}
