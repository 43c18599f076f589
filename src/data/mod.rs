pub mod forecast;
pub mod geocode;
pub mod geolocate;

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::series::SeriesError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("malformed hourly data: {0}")]
    Malformed(#[from] SeriesError),
}

impl FetchError {
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status),
            None => Self::Request(err),
        }
    }
}

pub(crate) fn http_client(timeout: std::time::Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default http client");
            reqwest::Client::new()
        })
}
