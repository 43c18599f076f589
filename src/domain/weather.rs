use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};

use crate::domain::series::HourlySeries;

mod conditions;
mod conversions;

pub use conditions::*;
pub use conversions::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

impl Location {
    /// A location known only by its coordinates, labelled `Lat …, Lon …`.
    #[must_use]
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("Lat {lat:.3}, Lon {lon:.3}"),
            latitude: lat,
            longitude: lon,
            country: None,
            admin1: None,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        let mut label = self.name.clone();
        for part in [&self.admin1, &self.country].into_iter().flatten() {
            if !part.is_empty() {
                label.push_str(", ");
                label.push_str(part);
            }
        }
        label
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f32,
    pub weather_code: Option<i32>,
    pub wind_speed_kmh: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: Option<i32>,
    pub temperature_max_c: Option<f32>,
    pub temperature_min_c: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ForecastBundle {
    pub location: Location,
    pub current: Option<CurrentConditions>,
    pub humidity_now: Option<f32>,
    pub hourly: HourlySeries,
    pub daily: Vec<DailyForecast>,
    pub utc_offset: FixedOffset,
    pub fetched_at: DateTime<Utc>,
}

impl ForecastBundle {
    /// Code used for the hero icon and theme: today's daily code, falling back
    /// to the current-conditions code.
    #[must_use]
    pub fn headline_code(&self) -> Option<i32> {
        self.daily
            .first()
            .and_then(|day| day.weather_code)
            .or_else(|| self.current.as_ref().and_then(|c| c.weather_code))
    }

    #[must_use]
    pub fn headline(&self) -> Option<Classification> {
        self.headline_code().map(classify)
    }

    #[must_use]
    pub fn today_high_low_c(&self) -> (Option<f32>, Option<f32>) {
        self.daily.first().map_or((None, None), |day| {
            (day.temperature_max_c, day.temperature_min_c)
        })
    }

    /// Hour of day at the forecast location for the given instant.
    #[must_use]
    pub fn local_hour(&self, now: DateTime<Utc>) -> u32 {
        now.with_timezone(&self.utc_offset).hour()
    }
}
