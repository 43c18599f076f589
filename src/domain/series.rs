//! Hour-resolution temperature series and the windows cut from them.
//!
//! A [`HourlySeries`] is the full forecast as received. It is partitioned into
//! [`DaySlice`]s by the local calendar date of each timestamp, and the chart
//! only ever shows a [`DisplayWindow`] of at most [`WINDOW_LEN`] samples.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use thiserror::Error;

use crate::domain::weather::{Units, to_fahrenheit};

pub const WINDOW_LEN: usize = 24;

pub type Timestamp = DateTime<FixedOffset>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("invalid input: {times} timestamps but {temps} temperatures")]
    InvalidInput { times: usize, temps: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    times: Vec<Timestamp>,
    temps: Vec<f32>,
}

impl HourlySeries {
    pub fn new(times: Vec<Timestamp>, temps: Vec<f32>) -> Result<Self, SeriesError> {
        check_lengths(&times, &temps)?;
        Ok(Self { times, temps })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn times(&self) -> &[Timestamp] {
        &self.times
    }

    #[must_use]
    pub fn temps(&self) -> &[f32] {
        &self.temps
    }

    #[must_use]
    pub fn day_slices(&self) -> Vec<DaySlice> {
        group_by_date(&self.times, &self.temps)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySlice {
    pub date_key: NaiveDate,
    pub times: Vec<Timestamp>,
    pub temps: Vec<f32>,
}

impl DaySlice {
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// The samples currently charted, with the slider position.
///
/// Never empty, and `selected` always indexes a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayWindow {
    times: Vec<Timestamp>,
    temps: Vec<f32>,
    selected: usize,
}

impl DisplayWindow {
    /// Builds a window from parallel samples, keeping at most [`WINDOW_LEN`].
    /// Returns `None` when there is nothing to show or the lengths disagree.
    #[must_use]
    pub fn from_samples(times: &[Timestamp], temps: &[f32]) -> Option<Self> {
        if times.is_empty() || times.len() != temps.len() {
            return None;
        }
        let take = times.len().min(WINDOW_LEN);
        Some(Self {
            times: times[..take].to_vec(),
            temps: temps[..take].to_vec(),
            selected: 0,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn times(&self) -> &[Timestamp] {
        &self.times
    }

    #[must_use]
    pub fn temps(&self) -> &[f32] {
        &self.temps
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Moves the slider, clamping into the window. Returns the applied index.
    pub fn select(&mut self, index: usize) -> usize {
        self.selected = index.min(self.len().saturating_sub(1));
        self.selected
    }

    pub fn step(&mut self, delta: isize) -> usize {
        self.select(self.selected.saturating_add_signed(delta))
    }

    #[must_use]
    pub fn selected_time(&self) -> Timestamp {
        self.times[self.selected]
    }

    #[must_use]
    pub fn selected_temp_c(&self) -> f32 {
        self.temps[self.selected]
    }

    /// Values as charted in `units`. Fahrenheit samples are whole degrees.
    #[must_use]
    pub fn display_values(&self, units: Units) -> Vec<f32> {
        match units {
            Units::Celsius => self.temps.clone(),
            Units::Fahrenheit => self
                .temps
                .iter()
                .map(|&celsius| to_fahrenheit(celsius) as f32)
                .collect(),
        }
    }
}

/// Groups parallel samples by the calendar date of each timestamp, read in
/// the timestamp's own offset. Slices appear in the order their first
/// sample was seen.
pub fn partition_by_day(
    times: &[Timestamp],
    temps: &[f32],
) -> Result<Vec<DaySlice>, SeriesError> {
    check_lengths(times, temps)?;
    Ok(group_by_date(times, temps))
}

/// First [`WINDOW_LEN`] samples of the addressed day, slider at 0.
///
/// `None` for an out-of-range index; callers keep their current window.
#[must_use]
pub fn window_for_day(slices: &[DaySlice], day_index: usize) -> Option<DisplayWindow> {
    let slice = slices.get(day_index)?;
    DisplayWindow::from_samples(&slice.times, &slice.temps)
}

/// Window starting at the first sample whose local hour equals `hour`, or at
/// the beginning of the series when no sample matches.
#[must_use]
pub fn window_anchored_at_hour(series: &HourlySeries, hour: u32) -> Option<DisplayWindow> {
    let start = series
        .times
        .iter()
        .position(|time| time.hour() == hour)
        .unwrap_or(0);
    DisplayWindow::from_samples(&series.times[start..], &series.temps[start..])
}

fn check_lengths(times: &[Timestamp], temps: &[f32]) -> Result<(), SeriesError> {
    if times.len() == temps.len() {
        Ok(())
    } else {
        Err(SeriesError::InvalidInput {
            times: times.len(),
            temps: temps.len(),
        })
    }
}

fn group_by_date(times: &[Timestamp], temps: &[f32]) -> Vec<DaySlice> {
    let mut slices: Vec<DaySlice> = Vec::new();
    let mut index_by_date: HashMap<NaiveDate, usize> = HashMap::new();

    for (time, temp) in times.iter().zip(temps) {
        let date_key = time.date_naive();
        let idx = *index_by_date.entry(date_key).or_insert_with(|| {
            slices.push(DaySlice {
                date_key,
                times: Vec::new(),
                temps: Vec::new(),
            });
            slices.len() - 1
        });
        slices[idx].times.push(*time);
        slices[idx].temps.push(*temp);
    }

    slices
}
