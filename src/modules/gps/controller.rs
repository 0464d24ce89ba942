use std::sync::Mutex;

use aula_cache::{QueryHandle, QueryOptions, keys};
use aula_models::{Device, DeviceId, Location};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::modules::crud::lock;
use crate::modules::gps::GpsService;
use crate::state::AppState;

/// A position older than this is shown as stale.
const STALE_AFTER_MINUTES: i64 = 5;

/// Live map of the school transport.
///
/// Locations are polled for as long as the page is open. The route
/// history query stays disabled until a device is selected.
pub struct GpsPage {
    devices: QueryHandle<Vec<Device>>,
    locations: QueryHandle<Vec<Location>>,
    history: QueryHandle<Vec<Location>>,
    selected: Mutex<Option<DeviceId>>,
}

impl GpsPage {
    pub fn new(state: &AppState) -> Self {
        let client = &state.client;
        let devices = state.cache.subscribe(
            keys::gps::devices(),
            GpsService::devices_fetcher(client.clone()),
            QueryOptions::default(),
        );
        let locations = state.cache.subscribe(
            keys::gps::locations(),
            GpsService::locations_fetcher(client.clone()),
            QueryOptions::new().refetch_interval(state.config.polling.gps_interval),
        );
        let history = state.cache.subscribe(
            keys::gps::history("", json!({})),
            GpsService::history_fetcher(client.clone()),
            QueryOptions::new().enabled(false),
        );

        Self {
            devices,
            locations,
            history,
            selected: Mutex::new(None),
        }
    }

    pub fn devices(&self) -> Vec<Device> {
        self.devices.data().unwrap_or_default()
    }

    pub fn locations(&self) -> Vec<Location> {
        self.locations.data().unwrap_or_default()
    }

    pub fn location_of(&self, device: &DeviceId) -> Option<Location> {
        self.locations().into_iter().find(|l| &l.device == device)
    }

    /// Devices whose last position is older than a few minutes.
    pub fn stale_devices(&self, now: DateTime<Utc>) -> Vec<DeviceId> {
        let max_age = Duration::minutes(STALE_AFTER_MINUTES);
        self.locations()
            .into_iter()
            .filter(|l| l.is_stale(now, max_age))
            .map(|l| l.device)
            .collect()
    }

    pub fn selected(&self) -> Option<DeviceId> {
        lock(&self.selected).clone()
    }

    /// Selects a device (loading its history) or clears the selection.
    pub fn select_device(&self, device: Option<DeviceId>) {
        match &device {
            Some(id) => {
                self.history
                    .set_key(keys::gps::history(id.as_str(), json!({})));
                self.history.set_enabled(true);
            }
            None => self.history.set_enabled(false),
        }
        *lock(&self.selected) = device;
    }

    pub fn history(&self) -> Vec<Location> {
        if self.history.is_enabled() {
            self.history.data().unwrap_or_default()
        } else {
            Vec::new()
        }
    }

    pub fn history_handle(&self) -> &QueryHandle<Vec<Location>> {
        &self.history
    }

    pub fn locations_handle(&self) -> &QueryHandle<Vec<Location>> {
        &self.locations
    }
}
