use std::env;
use std::time::Duration;

use crate::env_u64;

/// REST API connection settings.
///
/// # Environment Variables
///
/// - `AULA_API_URL`: Base URL including the `/api` prefix (default: `http://localhost:3000/api`)
/// - `AULA_API_TIMEOUT_SECS`: Ceiling for every outbound request (default: `30`)
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("AULA_API_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "http://localhost:3000/api".into());

        Self {
            base_url,
            timeout: Duration::from_secs(env_u64("AULA_API_TIMEOUT_SECS", 30)),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".into(),
            timeout: Duration::from_secs(30),
        }
    }
}
