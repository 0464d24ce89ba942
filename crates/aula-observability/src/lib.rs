//! Aula Observability Module
//!
//! Provides logging set-up and metric helpers for the client:
//! - Console logging via `tracing-subscriber`
//! - Rolling file and JSON logs via `tracing-appender`
//! - Counters for requests, cache activity, and toasts via `metrics`
//!
//! File logging can be disabled at compile time via the `observability`
//! feature flag, and at runtime via the `OBSERVABILITY_ENABLED` environment
//! variable. Metric helpers are always available; they are no-ops until the
//! embedding application installs a recorder.
//!
//! # Examples
//!
//! ```no_run
//! use aula_observability::init_tracing;
//!
//! init_tracing(std::path::Path::new("storage/logs"));
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
pub mod metrics;

pub use basic_logging::init_basic_console_logging;
#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled};
pub use metrics::{
    track_cache_hit, track_cache_invalidation, track_cache_miss, track_http_request,
    track_mutation, track_toast,
};

// No-op stubs when file logging is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    /// Observability is compiled out.
    pub fn is_observability_enabled() -> bool {
        false
    }

    /// Falls back to console logging only.
    pub fn init_tracing(_log_dir: &std::path::Path) {
        crate::init_basic_console_logging();
    }
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
