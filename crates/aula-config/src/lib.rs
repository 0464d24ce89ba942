//! # Aula Config
//!
//! Configuration types for the Aula admin client.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`api`]: REST API base URL and request timeout
//! - [`session`]: Where the session is persisted between runs
//! - [`query`]: Query cache freshness and garbage collection windows
//! - [`toast`]: Toast auto-dismiss duration
//! - [`polling`]: Poll periods and search debounce delay
//!
//! # Example
//!
//! ```ignore
//! use aula_config::AppConfig;
//!
//! let config = AppConfig::from_env();
//! println!("API at {}", config.api.base_url);
//! ```

pub mod api;
pub mod polling;
pub mod query;
pub mod session;
pub mod toast;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use polling::PollingConfig;
pub use query::QueryConfig;
pub use session::SessionConfig;
pub use toast::ToastConfig;

/// All client configuration in one place.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub query: QueryConfig,
    pub toast: ToastConfig,
    pub polling: PollingConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            session: SessionConfig::from_env(),
            query: QueryConfig::from_env(),
            toast: ToastConfig::from_env(),
            polling: PollingConfig::from_env(),
        }
    }
}

pub(crate) fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
