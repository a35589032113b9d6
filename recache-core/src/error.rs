//! Error types for recache.
//!
//! A single `thiserror` hierarchy covers validation, registry, and read
//! failures. Loader failures are carried verbatim as the boxed source of
//! [`CacheError::Load`] rather than being flattened into a string.

use thiserror::Error;

use crate::constants::{
    ERR_ALREADY_REGISTERED, ERR_CACHE_OUT_OF_DATE, ERR_INVALID_NAME, ERR_INVALID_TTL,
    ERR_LOAD_FAILED, MIN_TTL_MS,
};

/// Boxed error produced by a user-supplied loader.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias using [`CacheError`].
pub type Result<T> = std::result::Result<T, CacheError>;

/// Main error type for all recache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Cache name is empty or whitespace-only.
    #[error("invalid cache name: {0:?}")]
    InvalidName(String),

    /// TTL below the floor.
    #[error("ttl of {0} ms is below the {} ms floor", MIN_TTL_MS)]
    InvalidTtl(u64),

    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// A cache with this name is already registered. Re-creating over a live
    /// name is a configuration error, not an implicit refresh.
    #[error("cache '{0}' is already registered")]
    AlreadyRegistered(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // READ / LOAD ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// The instance is outdated: its last load failed or it has been shut
    /// down. Raised by the safe accessor, which refuses to hand back data
    /// once trust is broken.
    #[error("cache '{name}' is out of date")]
    OutOfDate {
        /// Name of the outdated cache.
        name: String,
    },

    /// The loader failed. The loader's own error is the `source` of this
    /// variant.
    #[error("cache load failed: {0}")]
    Load(#[source] BoxError),
}

impl CacheError {
    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CacheError::InvalidName(_) => ERR_INVALID_NAME,
            CacheError::InvalidTtl(_) => ERR_INVALID_TTL,
            CacheError::AlreadyRegistered(_) => ERR_ALREADY_REGISTERED,
            CacheError::OutOfDate { .. } => ERR_CACHE_OUT_OF_DATE,
            CacheError::Load(_) => ERR_LOAD_FAILED,
        }
    }

    /// Returns true if this is an input-validation error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CacheError::InvalidName(_) | CacheError::InvalidTtl(_)
        )
    }

    /// Returns true if this error came out of a loader invocation.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, CacheError::Load(_))
    }
}
