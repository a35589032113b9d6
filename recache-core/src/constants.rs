//! Tuning constants and error codes for recache.

// ═══════════════════════════════════════════════════════════════════════════════
// TTL BOUNDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Lowest accepted TTL in milliseconds.
///
/// Anything shorter turns the cache into a polling loop against the loader,
/// which is what this crate exists to avoid.
pub const MIN_TTL_MS: u64 = 1_000;

/// TTL used by [`CacheConfig::new`](crate::config::CacheConfig::new) when the
/// caller does not override it.
pub const DEFAULT_TTL_MS: u64 = 30_000;

/// The periodic check fires this many times per TTL window.
///
/// The timer runs finer-grained than the TTL itself so expiry is detected
/// promptly rather than exactly on the TTL boundary.
pub const CHECK_INTERVAL_DIVISOR: u64 = 10;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════
// Stable machine-readable codes, see `CacheError::code`.

/// Code carried by [`CacheError::OutOfDate`](crate::error::CacheError::OutOfDate).
pub const ERR_CACHE_OUT_OF_DATE: &str = "ERR_CACHE_OUT_OF_DATE";

/// Code for rejected cache names.
pub const ERR_INVALID_NAME: &str = "ERR_INVALID_NAME";

/// Code for TTLs below [`MIN_TTL_MS`].
pub const ERR_INVALID_TTL: &str = "ERR_INVALID_TTL";

/// Code for create() over a name that is already registered.
pub const ERR_ALREADY_REGISTERED: &str = "ERR_ALREADY_REGISTERED";

/// Code for a failed loader invocation.
pub const ERR_LOAD_FAILED: &str = "ERR_LOAD_FAILED";
