use std::time::Duration;

use crate::env_u64;

/// Poll periods for pages without push updates, and input debouncing.
///
/// # Environment Variables
///
/// - `AULA_GPS_POLL_SECS`: GPS positions refresh period (default: `10`)
/// - `AULA_MESSAGES_POLL_SECS`: Inbox and unread counter refresh period (default: `30`)
/// - `AULA_SEARCH_DEBOUNCE_MS`: Delay before a search box change hits the API (default: `300`)
#[derive(Clone, Debug)]
pub struct PollingConfig {
    pub gps_interval: Duration,
    pub messages_interval: Duration,
    pub search_debounce: Duration,
}

impl PollingConfig {
    pub fn from_env() -> Self {
        Self {
            gps_interval: Duration::from_secs(env_u64("AULA_GPS_POLL_SECS", 10)),
            messages_interval: Duration::from_secs(env_u64("AULA_MESSAGES_POLL_SECS", 30)),
            search_debounce: Duration::from_millis(env_u64("AULA_SEARCH_DEBOUNCE_MS", 300)),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            gps_interval: Duration::from_secs(10),
            messages_interval: Duration::from_secs(30),
            search_debounce: Duration::from_millis(300),
        }
    }
}
