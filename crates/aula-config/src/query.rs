use std::time::Duration;

use crate::env_u64;

/// Query cache timing.
///
/// # Environment Variables
///
/// - `AULA_QUERY_STALE_MS`: How long fetched data counts as fresh (default: `0`, always refetch on mount)
/// - `AULA_QUERY_GC_MS`: How long an unsubscribed entry survives before eviction (default: `300000`)
#[derive(Clone, Debug)]
pub struct QueryConfig {
    pub stale_time: Duration,
    pub gc_time: Duration,
}

impl QueryConfig {
    pub fn from_env() -> Self {
        Self {
            stale_time: Duration::from_millis(env_u64("AULA_QUERY_STALE_MS", 0)),
            gc_time: Duration::from_millis(env_u64("AULA_QUERY_GC_MS", 300_000)),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(300),
        }
    }
}
