//! GPS tracking for school transport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aula_core::serde::{deserialize_lenient_f64, deserialize_optional_string};

use crate::ids::DeviceId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(alias = "_id", default)]
    pub id: DeviceId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub plate: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub driver: Option<String>,
    #[serde(default)]
    pub online: bool,
}

/// A single position report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub device: DeviceId,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub longitude: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub speed: f64,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Location {
    /// Positions older than `max_age` are shown as stale on the map.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
        match self.recorded_at {
            Some(at) => now - at > max_age,
            None => true,
        }
    }
}
