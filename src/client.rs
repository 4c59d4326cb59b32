//! Remote catalog client.
//!
//! Thin typed wrapper over the catalog REST endpoints. Every call is a single round
//! trip: no retries, no caching, no timeouts. Failures are logged once here and then
//! returned to the caller unchanged.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{Destination, DestinationPayload, Hotel, HotelPayload};
use crate::shape::{self, DEFAULT_COLLECTION_KEYS, HOTEL_COLLECTION_KEYS};

/// Client for the destination and hotel endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Build a client for the backend named in `config`.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = Url::parse(config.api_url.trim()).map_err(|e| {
            ClientError::Config(format!("Invalid API URL {:?}: {}", config.api_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API URL {:?} cannot be used as a base",
                config.api_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Config(format!("HTTP client error: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// The base URL every path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ==================== DESTINATIONS ====================

    /// GET /destinations
    pub async fn list_destinations(&self) -> Result<Vec<Destination>, ClientError> {
        let body = self.get(self.url(&["destinations"])).await?;
        Ok(shape::decode_items(shape::collection(body, DEFAULT_COLLECTION_KEYS)))
    }

    /// GET /destinations/{id}
    pub async fn get_destination(&self, id: &str) -> Result<Destination, ClientError> {
        let body = self.get(self.url(&["destinations", id])).await?;
        record(body)
    }

    /// POST /destinations
    pub async fn create_destination(
        &self,
        data: &DestinationPayload,
    ) -> Result<Option<Destination>, ClientError> {
        let text = self
            .send(Method::POST, self.url(&["destinations"]), Some(data))
            .await?;
        Ok(echoed(&text))
    }

    /// PUT /destinations/{id}
    pub async fn update_destination(
        &self,
        id: &str,
        data: &DestinationPayload,
    ) -> Result<Option<Destination>, ClientError> {
        let text = self
            .send(Method::PUT, self.url(&["destinations", id]), Some(data))
            .await?;
        Ok(echoed(&text))
    }

    /// DELETE /destinations/{id}
    pub async fn delete_destination(&self, id: &str) -> Result<(), ClientError> {
        self.send::<()>(Method::DELETE, self.url(&["destinations", id]), None)
            .await?;
        Ok(())
    }

    // ==================== HOTELS ====================

    /// GET /hotels, optionally filtered with `?destinationId=`.
    pub async fn list_hotels(&self, destination_id: Option<&str>) -> Result<Vec<Hotel>, ClientError> {
        let mut url = self.url(&["hotels"]);
        if let Some(id) = destination_id.filter(|id| !id.is_empty()) {
            url.query_pairs_mut().append_pair("destinationId", id);
        }
        let body = self.get(url).await?;
        Ok(shape::decode_items(shape::collection(body, DEFAULT_COLLECTION_KEYS)))
    }

    /// GET /hotels/{id}
    pub async fn get_hotel(&self, id: &str) -> Result<Hotel, ClientError> {
        let body = self.get(self.url(&["hotels", id])).await?;
        record(body)
    }

    /// GET /hotels/destination/{id}
    pub async fn list_hotels_by_destination(
        &self,
        destination_id: &str,
    ) -> Result<Vec<Hotel>, ClientError> {
        let body = self
            .get(self.url(&["hotels", "destination", destination_id]))
            .await?;
        Ok(shape::decode_items(shape::collection(body, HOTEL_COLLECTION_KEYS)))
    }

    /// POST /hotels
    pub async fn create_hotel(&self, data: &HotelPayload) -> Result<Option<Hotel>, ClientError> {
        let text = self
            .send(Method::POST, self.url(&["hotels"]), Some(data))
            .await?;
        Ok(echoed(&text))
    }

    /// PUT /hotels/{id}
    pub async fn update_hotel(
        &self,
        id: &str,
        data: &HotelPayload,
    ) -> Result<Option<Hotel>, ClientError> {
        let text = self
            .send(Method::PUT, self.url(&["hotels", id]), Some(data))
            .await?;
        Ok(echoed(&text))
    }

    /// DELETE /hotels/{id}
    pub async fn delete_hotel(&self, id: &str) -> Result<(), ClientError> {
        self.send::<()>(Method::DELETE, self.url(&["hotels", id]), None)
            .await?;
        Ok(())
    }

    // ==================== TRANSPORT ====================

    /// Resolve path segments against the base URL, escaping each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get(&self, url: Url) -> Result<Value, ClientError> {
        let text = self.send::<()>(Method::GET, url, None).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Send one request and return the body of a 2xx response.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<String, ClientError> {
        tracing::debug!("{} {}", method, url);

        let mut request: RequestBuilder = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = lenient_body(&text);
            tracing::error!("API Error: {} {}", status.as_u16(), body);
            return Err(ClientError::from_status(status.as_u16(), body));
        }
        Ok(text)
    }
}

/// Decode a single record, unwrapping a `data` envelope if present.
fn record<T: DeserializeOwned>(body: Value) -> Result<T, ClientError> {
    Ok(serde_json::from_value(shape::unwrap_envelope(body))?)
}

/// Record echoed back by a successful write.
///
/// The status has already decided that the write succeeded, so a body that is not a
/// record is only logged.
fn echoed<T: DeserializeOwned>(text: &str) -> Option<T> {
    match serde_json::from_value(shape::unwrap_envelope(lenient_body(text))) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Saved, but the response is not a record ({}): {}", e, text);
            None
        }
    }
}

/// Error bodies are usually JSON but may be plain text or empty.
fn lenient_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
