//! Per-cache configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{CHECK_INTERVAL_DIVISOR, DEFAULT_TTL_MS, MIN_TTL_MS};
use crate::error::{CacheError, Result};

/// Configuration for one cache instance.
///
/// Built with [`CacheConfig::new`] plus builder-style setters:
///
/// ```rust
/// use recache_core::config::CacheConfig;
///
/// let config = CacheConfig::new("rates").ttl_ms(60_000);
/// assert_eq!(config.check_interval_ms(), 6_000);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache name, unique within a registry. Must be non-empty after
    /// trimming; the trimmed form is what gets registered.
    pub name: String,
    /// Reload cadence in milliseconds. Also the staleness window: data older
    /// than this is eligible for reload on the next timer check.
    pub ttl_ms: u64,
}

impl CacheConfig {
    /// Creates a configuration with the default TTL (30 s).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ttl_ms: DEFAULT_TTL_MS,
        }
    }

    /// Sets the TTL in milliseconds.
    pub fn ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    /// The timer firing period: one tenth of the TTL.
    pub fn check_interval_ms(&self) -> u64 {
        self.ttl_ms / CHECK_INTERVAL_DIVISOR
    }

    /// Validates the configuration and returns the trimmed name.
    pub fn validate(&self) -> Result<String> {
        let name = validate_name(&self.name)?;
        if self.ttl_ms < MIN_TTL_MS {
            return Err(CacheError::InvalidTtl(self.ttl_ms));
        }
        Ok(name)
    }
}

/// Validates a cache name: non-empty after trimming.
///
/// Returns the trimmed name. Names stay case-sensitive.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CacheError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(1_000 => true ; "exact floor accepted")]
    #[test_case(999 => false ; "just below floor rejected")]
    #[test_case(0 => false ; "zero rejected")]
    #[test_case(30_000 => true ; "default accepted")]
    #[test_case(u64::MAX => true ; "huge ttl accepted")]
    fn ttl_validation(ttl_ms: u64) -> bool {
        CacheConfig::new("rates").ttl_ms(ttl_ms).validate().is_ok()
    }

    #[test]
    fn test_name_is_trimmed() {
        let config = CacheConfig::new("  rates \n");
        assert_eq!(config.validate().unwrap(), "rates");
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = CacheConfig::new("   ").validate().unwrap_err();
        assert!(matches!(err, CacheError::InvalidName(_)));
    }

    #[test]
    fn test_check_interval_is_tenth_of_ttl() {
        let config = CacheConfig::new("rates").ttl_ms(1_000);
        assert_eq!(config.check_interval_ms(), 100);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = CacheConfig::new("rates").ttl_ms(5_000);
        let json = serde_json::to_string(&config).unwrap();
        let back: CacheConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "rates");
        assert_eq!(back.ttl_ms, 5_000);
    }

    proptest! {
        #[test]
        fn whitespace_only_names_always_rejected(name in "[ \\t\\n\\r]{0,12}") {
            prop_assert!(matches!(
                validate_name(&name),
                Err(CacheError::InvalidName(_))
            ));
        }

        #[test]
        fn padded_names_validate_to_trimmed(
            core in "[a-zA-Z0-9_.-]{1,24}",
            left in "[ \\t]{0,4}",
            right in "[ \\t]{0,4}",
        ) {
            let padded = format!("{left}{core}{right}");
            prop_assert_eq!(validate_name(&padded).unwrap(), core);
        }
    }
}
