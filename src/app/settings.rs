use std::time::Duration;

use crate::{
    cli::{Cli, IconMode, UnitsArg},
    data::{forecast::ForecastClient, geocode::GeocodeClient, geolocate::Geolocator},
    domain::weather::Units,
};

/// Endpoint overrides; `None` means the public Open-Meteo / ipapi service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub forecast: Option<String>,
    pub geocode: Option<String>,
    pub geoip: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    pub units: Units,
    pub icon_mode: IconMode,
    pub default_city: String,
    pub debounce: Duration,
    pub geolocation_timeout: Duration,
    pub fixed_position: Option<(f64, f64)>,
    pub geolocation_enabled: bool,
    pub endpoints: Endpoints,
}

impl RuntimeSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        let units = match cli.units {
            UnitsArg::Celsius => Units::Celsius,
            UnitsArg::Fahrenheit => Units::Fahrenheit,
        };

        Self {
            units,
            icon_mode: cli.icon_mode(),
            default_city: cli.default_city(),
            debounce: Duration::from_millis(cli.debounce_ms),
            geolocation_timeout: Duration::from_secs(cli.geolocation_timeout),
            fixed_position: cli.fixed_position(),
            geolocation_enabled: !cli.no_geolocation,
            endpoints: Endpoints {
                forecast: cli.forecast_url.clone(),
                geocode: cli.geocode_url.clone(),
                geoip: cli.geoip_url.clone(),
            },
        }
    }

    pub fn forecast_client(&self) -> ForecastClient {
        self.endpoints
            .forecast
            .as_deref()
            .map_or_else(ForecastClient::new, ForecastClient::with_base_url)
    }

    pub fn geocode_client(&self) -> GeocodeClient {
        self.endpoints
            .geocode
            .as_deref()
            .map_or_else(GeocodeClient::new, GeocodeClient::with_base_url)
    }

    pub fn geolocator(&self) -> Geolocator {
        let locator = Geolocator::new(self.endpoints.geoip.clone(), self.geolocation_timeout)
            .with_fixed_position(self.fixed_position);
        if self.geolocation_enabled {
            locator
        } else {
            locator.disabled()
        }
    }
}
