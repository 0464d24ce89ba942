//! The HTTP client.
//!
//! Every request the dashboard makes goes through [`HttpClient::request`],
//! which owns the cross-cutting rules:
//!
//! - the bearer token is attached when the session has one
//! - a 401 from any endpoint signs the user out and opens the login screen
//! - every failure is normalized into [`ClientError`]
//! - 2xx bodies are unwrapped from the `{ data, pagination, message }` envelope

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use aula_auth::SessionStore;
use aula_config::ApiConfig;
use aula_core::{
    ApiEnvelope, ClientError, ErrorBody, Paginated, resolve_document_url,
};
use aula_observability::track_http_request;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::client::params::query_pairs;
use crate::navigation::{Navigator, Route};

#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Builds a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(
        config: &ApiConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends one request and returns the decoded envelope.
    #[instrument(skip(self, body, params), fields(http.method = %method, http.path = %path))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: Option<&Value>,
    ) -> Result<ApiEnvelope<T>, ClientError> {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(params) = params {
            request = request.query(&query_pairs(params));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, timeout = e.is_timeout(), "Request got no response");
                track_http_request(method.as_str(), 0);
                return Err(ClientError::network());
            }
        };

        let status = response.status();
        track_http_request(method.as_str(), status.as_u16());
        debug!(
            http.status = status.as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Response received"
        );

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Response body was cut off");
                return Err(ClientError::network());
            }
        };

        if status == StatusCode::UNAUTHORIZED {
            warn!("Server rejected the session, signing out");
            self.session.logout();
            self.navigator.navigate(Route::Login);
            return Err(match error_message(&bytes) {
                Some(message) => ClientError::Unauthorized { message },
                None => ClientError::unauthorized(),
            });
        }

        if !status.is_success() {
            return Err(ClientError::http(status.as_u16(), error_message(&bytes)));
        }

        decode_envelope(&bytes)
    }

    /// `GET` returning the envelope's `data`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Value,
    ) -> Result<T, ClientError> {
        let params = (!params.is_null()).then_some(params);
        Ok(self.request(Method::GET, path, None, params).await?.into_data())
    }

    /// `GET` on a list endpoint, keeping the pagination block.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Value,
    ) -> Result<Paginated<T>, ClientError> {
        let params = (!params.is_null()).then_some(params);
        Ok(self
            .request::<Vec<T>>(Method::GET, path, None, params)
            .await?
            .into_page())
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let body = encode(body)?;
        Ok(self
            .request(Method::POST, path, Some(&body), None)
            .await?
            .into_data())
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let body = encode(body)?;
        Ok(self
            .request(Method::PUT, path, Some(&body), None)
            .await?
            .into_data())
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let body = encode(body)?;
        Ok(self
            .request(Method::PATCH, path, Some(&body), None)
            .await?
            .into_data())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.request::<Value>(Method::DELETE, path, None, None)
            .await
            .map(drop)
    }

    /// Absolute URL of an uploaded document.
    pub fn document_url(&self, reference: &str) -> Option<String> {
        resolve_document_url(&self.base_url, reference)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Decode {
        message: format!("Could not encode request body: {e}"),
    })
}

fn error_message(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(ErrorBody::into_message)
}

/// Decodes a 2xx body. Empty bodies and bodies without a `data` member
/// are treated as `data: null`; bare payloads are wrapped.
fn decode_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<ApiEnvelope<T>, ClientError> {
    let body: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(bytes).map_err(ClientError::decode)?
    };

    let envelope = match body {
        Value::Object(mut map) if map.contains_key("data") || map.contains_key("message") => {
            map.entry("data").or_insert(Value::Null);
            Value::Object(map)
        }
        other => {
            let mut map = Map::new();
            map.insert("data".into(), other);
            Value::Object(map)
        }
    };

    serde_json::from_value(envelope).map_err(ClientError::decode)
}
