#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Unicode,
    Ascii,
    Emoji,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-spark",
    version,
    about = "Terminal weather dashboard with an hourly sparkline"
)]
pub struct Cli {
    /// City loaded on startup (default: Chennai)
    pub city: Option<String>,

    /// Initial display units
    #[arg(long, value_enum, default_value_t = UnitsArg::Celsius)]
    pub units: UnitsArg,

    /// Force ASCII icons
    #[arg(long, conflicts_with = "unicode_icons")]
    pub ascii_icons: bool,

    /// Force single-width unicode icons instead of emoji
    #[arg(long)]
    pub unicode_icons: bool,

    /// Fixed device latitude (requires --lon); used on startup and by location detection
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Fixed device longitude (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Disable location detection
    #[arg(long)]
    pub no_geolocation: bool,

    /// Quiet period before a search suggestion lookup, in milliseconds
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,

    /// Location detection timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=120))]
    pub geolocation_timeout: u64,

    /// Override the forecast endpoint
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Override the geocoding endpoint
    #[arg(long)]
    pub geocode_url: Option<String>,

    /// Override the IP geolocation endpoint
    #[arg(long)]
    pub geoip_url: Option<String>,

    /// Write diagnostics to this file (filter with WEATHER_SPARK_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn default_city(&self) -> String {
        self.city.clone().unwrap_or_else(|| "Chennai".to_string())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn fixed_position(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }

    #[must_use]
    pub fn icon_mode(&self) -> IconMode {
        if self.ascii_icons {
            IconMode::Ascii
        } else if self.unicode_icons {
            IconMode::Unicode
        } else {
            IconMode::Emoji
        }
    }
}
