//! Collaborator interfaces: the snapshot loader and the event sink.
//!
//! Both sides of the cache boundary are traits so callers can plug in
//! anything from a database query to a fixture closure, and so
//! observability stays an injected concern instead of a null-check
//! scattered through the core.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::BoxError;

/// A complete replacement data set produced by one loader invocation.
///
/// Values are opaque to the cache; it only ever replaces the whole map.
pub type Snapshot<V> = HashMap<String, V>;

// ═══════════════════════════════════════════════════════════════════════════════
// LOADER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Produces a full snapshot, or fails.
///
/// The loader is entirely under the caller's control: it may be slow, it may
/// hang, it may fail. The cache never cancels an in-flight invocation; it
/// only guarantees that two invocations for the same instance never overlap.
#[async_trait]
pub trait SnapshotLoader<V>: Send + Sync {
    /// Fetches the complete data set.
    async fn load(&self) -> std::result::Result<Snapshot<V>, BoxError>;
}

/// Any `Fn() -> Future` closure is a loader.
#[async_trait]
impl<V, F, Fut> SnapshotLoader<V> for F
where
    V: 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<Snapshot<V>, BoxError>> + Send + 'static,
{
    async fn load(&self) -> std::result::Result<Snapshot<V>, BoxError> {
        (self)().await
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT SINK TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Observer for cache lifecycle and access events.
///
/// Every method defaults to a no-op, so a sink only implements what it cares
/// about. Emission is fire-and-forget: sinks must not block, and their
/// absence never changes cache behavior.
pub trait CacheEvents<V>: Send + Sync {
    /// Initialization is starting; the initial load is about to run.
    fn init_start(&self, _name: &str) {}

    /// Initialization finished, with the elapsed duration of the initial load.
    fn init_end(&self, _name: &str, _elapsed: Duration) {}

    /// A load attempt is starting. `timestamp` is the new staleness anchor.
    fn load(
        &self,
        _name: &str,
        _load_count: u64,
        _was_forced: bool,
        _timestamp: Instant,
        _was_expired: bool,
    ) {
    }

    /// A forced refresh was requested.
    fn refresh(&self, _name: &str, _load_count: u64, _last_load: Option<Instant>) {}

    /// Something noteworthy but non-fatal happened.
    fn warn(&self, _name: &str, _message: &str) {}

    /// A safe read was served.
    fn get(&self, _name: &str, _key: &str, _value: Option<&V>) {}

    /// A best-effort read was served.
    fn get_unsafe(&self, _name: &str, _key: &str, _value: Option<&V>) {}
}

/// Event sink that ignores everything. The default when no sink is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEvents;

impl<V> CacheEvents<V> for NoopEvents {}
