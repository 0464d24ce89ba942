use std::time::Duration;

use crate::env_u64;

/// Toast layer settings.
///
/// # Environment Variables
///
/// - `AULA_TOAST_DURATION_MS`: Time before a toast dismisses itself (default: `5000`)
#[derive(Clone, Debug)]
pub struct ToastConfig {
    pub duration: Duration,
}

impl ToastConfig {
    pub fn from_env() -> Self {
        Self {
            duration: Duration::from_millis(env_u64("AULA_TOAST_DURATION_MS", 5_000)),
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(5),
        }
    }
}
