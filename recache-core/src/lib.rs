//! # Recache Core
//!
//! Core types, errors, and traits shared by the recache crates.
//!
//! This crate provides the foundational building blocks used by
//! `recache-cache` and `recache-registry`:
//!
//! - **Config**: Per-cache configuration with validation
//! - **Errors**: One `CacheError` hierarchy with machine-readable codes
//! - **Constants**: TTL bounds and timer tuning
//! - **Traits**: The `SnapshotLoader` and `CacheEvents` seams
//!
//! ## Example
//!
//! ```rust
//! use recache_core::{CacheConfig, CacheError};
//!
//! let config = CacheConfig::new("rates").ttl_ms(500);
//! assert!(matches!(config.validate(), Err(CacheError::InvalidTtl(500))));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;

// Re-export commonly used items at crate root
pub use config::{validate_name, CacheConfig};
pub use constants::*;
pub use error::{BoxError, CacheError, Result};
pub use traits::{CacheEvents, NoopEvents, Snapshot, SnapshotLoader};
