use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::{
    app::settings::RuntimeSettings,
    cli::Cli,
    domain::{
        series::HourlySeries,
        weather::{CurrentConditions, DailyForecast, ForecastBundle, Location},
    },
};

/// Endpoints that refuse connections, so spawned fetches fail fast.
pub(crate) const DEAD_ENDPOINT: &str = "http://127.0.0.1:1/unreachable";

pub(crate) fn state_test_cli() -> Cli {
    use clap::Parser;
    Cli::parse_from([
        "weather-spark",
        "--forecast-url",
        DEAD_ENDPOINT,
        "--geocode-url",
        DEAD_ENDPOINT,
        "--geoip-url",
        DEAD_ENDPOINT,
    ])
}

pub(crate) fn state_test_settings() -> RuntimeSettings {
    RuntimeSettings::from_cli(&state_test_cli())
}

pub(crate) fn ist() -> FixedOffset {
    FixedOffset::east_opt(19_800).expect("valid offset")
}

/// Two local days of hourly samples starting at local midnight; temperature
/// climbs half a degree per hour within each day.
pub(crate) fn sample_series(hours: usize) -> HourlySeries {
    let start = ist()
        .with_ymd_and_hms(2026, 2, 12, 0, 0, 0)
        .single()
        .expect("valid start");
    let times = (0..hours)
        .map(|idx| start + Duration::hours(i64::try_from(idx).unwrap_or(0)))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let temps = (0..hours).map(|idx| 24.0 + (idx % 24) as f32 * 0.5).collect();
    HourlySeries::new(times, temps).expect("aligned fixture")
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    // 09:30 at UTC+05:30
    Utc.with_ymd_and_hms(2026, 2, 12, 4, 0, 0)
        .single()
        .expect("valid instant")
}

pub(crate) fn sample_bundle() -> ForecastBundle {
    ForecastBundle {
        location: Location {
            name: "Chennai".to_string(),
            latitude: 13.0878,
            longitude: 80.2785,
            country: Some("India".to_string()),
            admin1: Some("Tamil Nadu".to_string()),
        },
        current: Some(CurrentConditions {
            temperature_c: 31.4,
            weather_code: Some(3),
            wind_speed_kmh: Some(14.4),
        }),
        humidity_now: Some(64.0),
        hourly: sample_series(48),
        daily: vec![
            DailyForecast {
                date: NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date"),
                weather_code: Some(0),
                temperature_max_c: Some(33.2),
                temperature_min_c: Some(24.0),
            },
            DailyForecast {
                date: NaiveDate::from_ymd_opt(2026, 2, 13).expect("valid date"),
                weather_code: Some(61),
                temperature_max_c: Some(29.6),
                temperature_min_c: Some(23.4),
            },
        ],
        utc_offset: ist(),
        fetched_at: fixed_now(),
    }
}
