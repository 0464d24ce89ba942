use aula_cache::{QueryFn, QueryKey};
use aula_core::ClientError;
use aula_models::{Device, Location};
use serde_json::Value;
use tracing::instrument;

use crate::client::HttpClient;

pub struct GpsService;

impl GpsService {
    pub async fn devices(client: &HttpClient) -> Result<Vec<Device>, ClientError> {
        client.get("/gps/devices", &Value::Null).await
    }

    /// Latest known position of every device.
    pub async fn locations(client: &HttpClient) -> Result<Vec<Location>, ClientError> {
        client.get("/gps/locations", &Value::Null).await
    }

    #[instrument(skip(client, params))]
    pub async fn history(
        client: &HttpClient,
        device_id: &str,
        params: &Value,
    ) -> Result<Vec<Location>, ClientError> {
        client
            .get(&format!("/gps/devices/{device_id}/history"), params)
            .await
    }

    pub fn devices_fetcher(client: HttpClient) -> QueryFn {
        QueryFn::new(move |_: QueryKey| {
            let client = client.clone();
            async move { Self::devices(&client).await }
        })
    }

    pub fn locations_fetcher(client: HttpClient) -> QueryFn {
        QueryFn::new(move |_: QueryKey| {
            let client = client.clone();
            async move { Self::locations(&client).await }
        })
    }

    /// Fetcher for history keys: segment 1 is the device id.
    pub fn history_fetcher(client: HttpClient) -> QueryFn {
        QueryFn::new(move |key: QueryKey| {
            let client = client.clone();
            async move {
                let device_id = key.segment_str(1).unwrap_or_default();
                let params = key.params::<Value>().unwrap_or(Value::Null);
                Self::history(&client, &device_id, &params).await
            }
        })
    }
}
