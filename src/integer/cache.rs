// ============================================================================
// Small Integer Cache
// Shared instances for values in [-999, 999]
// ============================================================================

use super::big_integer::BigInteger;
use std::sync::OnceLock;

/// Values with magnitude below this bound are served from the cache.
pub const CACHE_BOUND: i64 = 1000;

static SMALL_INTEGERS: OnceLock<Vec<BigInteger>> = OnceLock::new();

fn table() -> &'static [BigInteger] {
    SMALL_INTEGERS.get_or_init(|| {
        tracing::debug!(bound = CACHE_BOUND, "initializing small integer cache");
        (1 - CACHE_BOUND..CACHE_BOUND).map(BigInteger::from).collect()
    })
}

impl BigInteger {
    /// Shared instance for `value` when `|value| < 1000`.
    pub fn cached(value: i64) -> Option<&'static BigInteger> {
        if value.unsigned_abs() >= CACHE_BOUND as u64 {
            return None;
        }
        table().get((value + CACHE_BOUND - 1) as usize)
    }

    /// Owned small value, cloned from the cache when possible.
    pub fn small(value: i64) -> BigInteger {
        match Self::cached(value) {
            Some(cached) => cached.clone(),
            None => BigInteger::from(value),
        }
    }
}
