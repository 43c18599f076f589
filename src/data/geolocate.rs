use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::http_client;
use crate::domain::weather::Location;

const GEOIP_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("location permission denied")]
    Denied,
    #[error("location request timed out")]
    Timeout,
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the device position: a fixed coordinate pair when configured,
/// otherwise an IP geolocation lookup bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct Geolocator {
    client: Client,
    url: String,
    fixed: Option<(f64, f64)>,
    enabled: bool,
    timeout: Duration,
}

impl Geolocator {
    pub fn new(url: Option<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            url: url.unwrap_or_else(|| GEOIP_URL.to_string()),
            fixed: None,
            enabled: true,
            timeout,
        }
    }

    #[must_use]
    pub fn with_fixed_position(mut self, position: Option<(f64, f64)>) -> Self {
        self.fixed = position;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub async fn locate(&self) -> Result<Location, GeolocationError> {
        if !self.enabled {
            return Err(GeolocationError::Unsupported);
        }
        if let Some((lat, lon)) = self.fixed {
            return Ok(Location::from_coords(lat, lon));
        }
        tokio::time::timeout(self.timeout, self.lookup())
            .await
            .map_err(|_| GeolocationError::Timeout)?
    }

    async fn lookup(&self) -> Result<Location, GeolocationError> {
        debug!(url = %self.url, "requesting ip geolocation");
        let response = self.client.get(&self.url).send().await.map_err(|err| {
            if err.is_timeout() {
                GeolocationError::Timeout
            } else {
                GeolocationError::Unavailable(err.to_string())
            }
        })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(GeolocationError::Denied);
            }
            status if !status.is_success() => {
                return Err(GeolocationError::Unavailable(format!(
                    "server returned {status}"
                )));
            }
            _ => {}
        }

        let payload: IpApiResponse = response
            .json()
            .await
            .map_err(|err| GeolocationError::Unavailable(err.to_string()))?;
        let (Some(lat), Some(lon)) = (payload.latitude, payload.longitude) else {
            return Err(GeolocationError::Unavailable(
                "response had no coordinates".to_string(),
            ));
        };
        Ok(Location::from_coords(lat, lon))
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}
