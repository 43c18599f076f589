use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{FetchError, http_client};
use crate::domain::weather::Location;

const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const MAX_CANDIDATES: &str = "8";

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeClient {
    pub fn new() -> Self {
        Self::with_base_url(GEOCODE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: http_client(std::time::Duration::from_secs(8)),
            base_url: base_url.into(),
        }
    }

    /// Candidates for `query` in provider order. Blank queries and failed
    /// lookups both produce an empty list.
    pub async fn search(&self, query: &str) -> Vec<Location> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        match self.lookup(query).await {
            Ok(locations) => {
                debug!(query, count = locations.len(), "geocoding lookup finished");
                locations
            }
            Err(err) => {
                warn!(query, error = %err, "geocoding lookup failed");
                Vec::new()
            }
        }
    }

    async fn lookup(&self, query: &str) -> Result<Vec<Location>, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", query),
                ("count", MAX_CANDIDATES),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(FetchError::from_send)?
            .error_for_status()
            .map_err(FetchError::from_send)?;

        let payload: GeocodeResponse = response.json().await.map_err(FetchError::Decode)?;
        Ok(payload
            .results
            .unwrap_or_default()
            .into_iter()
            .map(GeocodeResult::into_location)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl GeocodeResult {
    fn into_location(self) -> Location {
        Location {
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            country: self.country,
            admin1: self.admin1,
        }
    }
}
