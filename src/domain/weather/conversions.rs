use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

use super::Units;

#[must_use]
pub fn to_fahrenheit(celsius: f32) -> i32 {
    round_temp(celsius * 9.0 / 5.0 + 32.0)
}

#[must_use]
pub fn to_celsius(fahrenheit: f32) -> i32 {
    round_temp((fahrenheit - 32.0) * 5.0 / 9.0)
}

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 1.8 + 32.0,
    }
}

/// Whole-degree value shown to the user. Fahrenheit is derived from the
/// rounded Celsius reading so both units agree with the headline number.
#[must_use]
pub fn display_temp(celsius: f32, units: Units) -> i32 {
    let rounded = round_temp(celsius);
    match units {
        Units::Celsius => rounded,
        Units::Fahrenheit => to_fahrenheit(rounded as f32),
    }
}

#[must_use]
pub fn format_temp(celsius: Option<f32>, units: Units) -> String {
    celsius.map_or_else(
        || "--".to_string(),
        |value| format!("{}{}", display_temp(value, units), units.symbol()),
    )
}

#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn convert_wind_speed(kmh: f32) -> f32 {
    kmh / 3.6
}

/// Parses an hourly timestamp. RFC 3339 values keep their own offset; naive
/// `YYYY-MM-DDTHH:MM` values are interpreted at `offset`.
#[must_use]
pub fn parse_local_datetime(value: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()?;
    offset.from_local_datetime(&naive).single()
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
