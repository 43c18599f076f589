use tokio::sync::mpsc;
use tracing::{debug, info};

use super::AppState;
use crate::{
    app::{
        events::{AppEvent, FetchOrigin},
        requests::RequestId,
    },
    domain::weather::Location,
};

impl AppState {
    /// Loads the position given on the command line, or the default city's
    /// first geocoding match.
    pub(crate) fn start_initial_load(&mut self, tx: &mpsc::Sender<AppEvent>) {
        let request = self.issue_request();
        if let Some((lat, lon)) = self.settings.fixed_position {
            self.loading_message = "Fetching weather...".to_string();
            self.spawn_forecast(tx, request, FetchOrigin::Startup, Location::from_coords(lat, lon));
            return;
        }

        let city = self.settings.default_city.clone();
        self.loading_message = format!("Loading {city}...");
        info!(%city, "initial load");
        let geocoder = self.settings.geocode_client();
        let forecaster = self.settings.forecast_client();
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match geocoder.search(&city).await.into_iter().next() {
                Some(location) => match forecaster.fetch(location).await {
                    Ok(bundle) => AppEvent::ForecastReady {
                        request,
                        origin: FetchOrigin::Startup,
                        bundle,
                    },
                    Err(err) => AppEvent::ForecastFailed {
                        request,
                        origin: FetchOrigin::Startup,
                        message: err.to_string(),
                    },
                },
                None => AppEvent::ForecastFailed {
                    request,
                    origin: FetchOrigin::Startup,
                    message: format!("no geocoding result for {city}"),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    pub(crate) fn spawn_forecast(
        &self,
        tx: &mpsc::Sender<AppEvent>,
        request: RequestId,
        origin: FetchOrigin,
        location: Location,
    ) {
        let client = self.settings.forecast_client();
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match client.fetch(location).await {
                Ok(bundle) => AppEvent::ForecastReady {
                    request,
                    origin,
                    bundle,
                },
                Err(err) => AppEvent::ForecastFailed {
                    request,
                    origin,
                    message: err.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    pub(crate) fn spawn_detection(&self, tx: &mpsc::Sender<AppEvent>, request: RequestId) {
        let locator = self.settings.geolocator();
        let client = self.settings.forecast_client();
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match locator.locate().await {
                Ok(location) => {
                    debug!(
                        latitude = location.latitude,
                        longitude = location.longitude,
                        "position resolved"
                    );
                    match client.fetch(location).await {
                        Ok(bundle) => AppEvent::ForecastReady {
                            request,
                            origin: FetchOrigin::Geolocation,
                            bundle,
                        },
                        Err(err) => AppEvent::ForecastFailed {
                            request,
                            origin: FetchOrigin::Geolocation,
                            message: err.to_string(),
                        },
                    }
                }
                Err(error) => AppEvent::GeolocationFailed { request, error },
            };
            let _ = tx.send(event).await;
        });
    }

    pub(crate) fn spawn_suggestions(
        &self,
        tx: &mpsc::Sender<AppEvent>,
        generation: u64,
        query: String,
    ) {
        let geocoder = self.settings.geocode_client();
        let tx = tx.clone();
        tokio::spawn(async move {
            let results = geocoder.search(&query).await;
            let _ = tx
                .send(AppEvent::SuggestionsReady {
                    generation,
                    results,
                })
                .await;
        });
    }
}
