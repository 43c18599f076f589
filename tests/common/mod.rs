#![allow(clippy::cast_precision_loss)]
#![allow(dead_code)]

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use weather_spark::{
    app::{
        debounce::{ScheduledTask, Scheduler},
        events::AppEvent,
        settings::RuntimeSettings,
        state::AppState,
    },
    cli::Cli,
    domain::{
        series::HourlySeries,
        weather::{CurrentConditions, DailyForecast, ForecastBundle, Location},
    },
};

/// Refuses connections, so anything spawned against it fails fast.
pub const DEAD_ENDPOINT: &str = "http://127.0.0.1:1/unreachable";

/// Scheduler that never fires; suggestion lookups stay pending.
pub struct IdleScheduler;

struct IdleTask;

impl ScheduledTask for IdleTask {
    fn cancel(&self) {}
}

impl Scheduler for IdleScheduler {
    fn schedule(
        &self,
        _tx: &mpsc::Sender<AppEvent>,
        _delay: StdDuration,
        _event: AppEvent,
    ) -> Box<dyn ScheduledTask> {
        Box::new(IdleTask)
    }
}

pub fn madrid_cli(extra: &[&str]) -> Cli {
    cli_with(DEAD_ENDPOINT, DEAD_ENDPOINT, extra)
}

pub fn cli_with(forecast_url: &str, geocode_url: &str, extra: &[&str]) -> Cli {
    let mut args = vec![
        "weather-spark",
        "Madrid",
        "--ascii-icons",
        "--forecast-url",
        forecast_url,
        "--geocode-url",
        geocode_url,
        "--geoip-url",
        DEAD_ENDPOINT,
    ];
    args.extend_from_slice(extra);
    Cli::parse_from(args)
}

pub fn idle_state(cli: &Cli) -> AppState {
    AppState::with_scheduler(RuntimeSettings::from_cli(cli), Box::new(IdleScheduler))
}

pub fn cet() -> FixedOffset {
    FixedOffset::east_opt(3_600).expect("valid offset")
}

/// 10:00 local time in Madrid on the first fixture day.
pub fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 12, 9, 0, 0)
        .single()
        .expect("valid instant")
}

pub fn madrid() -> Location {
    Location {
        name: "Madrid".to_string(),
        latitude: 40.4168,
        longitude: -3.7038,
        country: Some("Spain".to_string()),
        admin1: None,
    }
}

/// Hourly samples from local midnight; each hour is `hour_of_day` tenths
/// of a degree above 5°C plus one degree per elapsed day.
pub fn hourly_series(hours: usize) -> HourlySeries {
    let start = cet()
        .with_ymd_and_hms(2026, 2, 12, 0, 0, 0)
        .single()
        .expect("valid start");
    let times = (0..hours)
        .map(|idx| start + Duration::hours(idx as i64))
        .collect();
    let temps = (0..hours).map(sample_temp).collect();
    HourlySeries::new(times, temps).expect("aligned series")
}

pub fn sample_temp(idx: usize) -> f32 {
    5.0 + (idx % 24) as f32 * 0.1 + (idx / 24) as f32
}

pub fn madrid_bundle(hours: usize) -> ForecastBundle {
    ForecastBundle {
        location: madrid(),
        current: Some(CurrentConditions {
            temperature_c: 8.6,
            weather_code: Some(2),
            wind_speed_kmh: Some(18.0),
        }),
        humidity_now: Some(71.0),
        hourly: hourly_series(hours),
        daily: vec![
            DailyForecast {
                date: NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date"),
                weather_code: Some(2),
                temperature_max_c: Some(12.4),
                temperature_min_c: Some(3.1),
            },
            DailyForecast {
                date: NaiveDate::from_ymd_opt(2026, 2, 13).expect("valid date"),
                weather_code: Some(71),
                temperature_max_c: Some(6.0),
                temperature_min_c: Some(-1.5),
            },
        ],
        utc_offset: cet(),
        fetched_at: morning(),
    }
}

/// State with the Madrid forecast applied at [`morning`].
pub fn ready_state(cli: &Cli) -> AppState {
    let mut state = idle_state(cli);
    let request = state.issue_request();
    assert!(state.apply_forecast(request, madrid_bundle(48), morning()));
    state
}

/// Open-Meteo style payload for `hours` samples at UTC+01:00.
pub fn forecast_body(hours: usize) -> Value {
    let times: Vec<String> = (0..hours)
        .map(|idx| format!("2026-02-{:02}T{:02}:00", 12 + idx / 24, idx % 24))
        .collect();
    let temps: Vec<f32> = (0..hours).map(sample_temp).collect();
    let humidity: Vec<f32> = vec![71.0; hours];
    json!({
        "utc_offset_seconds": 3600,
        "current": {
            "temperature_2m": 8.6,
            "weather_code": 2,
            "wind_speed_10m": 18.0
        },
        "hourly": {
            "time": times,
            "temperature_2m": temps,
            "relative_humidity_2m": humidity
        },
        "daily": {
            "time": ["2026-02-12", "2026-02-13"],
            "weather_code": [2, 71],
            "temperature_2m_max": [12.4, 6.0],
            "temperature_2m_min": [3.1, -1.5]
        }
    })
}

pub fn key(code: KeyCode) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

pub fn char_key(c: char) -> AppEvent {
    key(KeyCode::Char(c))
}
