use anyhow::Result;
use chrono::{DateTime, Local, Timelike, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    app::{
        debounce::{Debouncer, Scheduler, TokioScheduler},
        events::{AppEvent, FetchOrigin},
        requests::{RequestId, RequestSequencer},
        settings::RuntimeSettings,
    },
    cli::Cli,
    data::geolocate::GeolocationError,
    domain::{
        series::{DaySlice, DisplayWindow, window_anchored_at_hour, window_for_day},
        weather::{Classification, ForecastBundle, Location, Units, round_temp, to_fahrenheit},
    },
    ui::sparkline::{PixelRatio, Surface},
};

mod fetch;
mod input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Dashboard,
}

/// Contents of the suggestion list under the search bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Suggestions {
    #[default]
    Hidden,
    Searching,
    Results(Vec<Location>),
    NoResults,
}

impl Suggestions {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Slider readout: local hour and the temperature in display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourPreview {
    pub hour: u32,
    pub temp: i32,
    pub units: Units,
}

impl HourPreview {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}:00", self.hour)
    }
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub loading_message: String,
    pub settings: RuntimeSettings,
    pub units: Units,
    pub focus: Focus,
    pub query: String,
    pub suggestions: Suggestions,
    pub suggestion_cursor: usize,
    pub weather: Option<ForecastBundle>,
    pub slices: Vec<DaySlice>,
    pub window: Option<DisplayWindow>,
    pub selected_day: Option<usize>,
    pub notice: Option<String>,
    pub detecting: bool,
    pub last_updated: Option<DateTime<Local>>,
    pub spark_surface: Surface,
    requests: RequestSequencer,
    debouncer: Debouncer,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        Self::with_scheduler(RuntimeSettings::from_cli(cli), Box::new(TokioScheduler))
    }

    pub fn with_scheduler(settings: RuntimeSettings, scheduler: Box<dyn Scheduler>) -> Self {
        Self {
            mode: AppMode::Loading,
            running: true,
            loading_message: "Initializing...".to_string(),
            units: settings.units,
            focus: Focus::Dashboard,
            query: String::new(),
            suggestions: Suggestions::Hidden,
            suggestion_cursor: 0,
            weather: None,
            slices: Vec::new(),
            window: None,
            selected_day: None,
            notice: None,
            detecting: false,
            last_updated: None,
            spark_surface: Surface::new(PixelRatio::BRAILLE),
            requests: RequestSequencer::default(),
            debouncer: Debouncer::new(scheduler, settings.debounce),
            settings,
        }
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => self.start_initial_load(tx),
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::SuggestDue { generation } => self.on_suggest_due(generation, tx),
            AppEvent::SuggestionsReady {
                generation,
                results,
            } => {
                self.apply_suggestions(generation, results);
            }
            AppEvent::ForecastReady {
                request,
                origin,
                bundle,
            } => {
                if origin == FetchOrigin::Geolocation {
                    self.detecting = false;
                }
                self.apply_forecast(request, bundle, Utc::now());
            }
            AppEvent::ForecastFailed {
                request,
                origin,
                message,
            } => {
                if origin == FetchOrigin::Geolocation {
                    self.detecting = false;
                }
                self.apply_fetch_failure(request, origin, &message);
            }
            AppEvent::GeolocationFailed { request, error } => {
                self.apply_geolocation_failure(request, &error);
            }
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
            }
        }
        Ok(())
    }

    /// Reserves the id for a new forecast request.
    pub fn issue_request(&mut self) -> RequestId {
        self.requests.issue()
    }

    /// Installs a forecast unless a newer request has already been applied.
    /// The window is anchored at the current hour in the location's offset.
    pub fn apply_forecast(
        &mut self,
        request: RequestId,
        bundle: ForecastBundle,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.requests.accept(request) {
            warn!(?request, "dropping stale forecast response");
            return false;
        }

        let hour = bundle.local_hour(now);
        self.slices = bundle.hourly.day_slices();
        self.window = window_anchored_at_hour(&bundle.hourly, hour);
        self.selected_day = None;
        if self.focus != Focus::Search {
            self.query = bundle.location.display_name();
        }
        info!(
            location = %bundle.location.display_name(),
            samples = bundle.hourly.len(),
            days = self.slices.len(),
            anchor_hour = hour,
            "forecast applied"
        );

        self.weather = Some(bundle);
        self.last_updated = Some(now.with_timezone(&Local));
        self.mode = AppMode::Ready;
        self.loading_message.clear();
        true
    }

    /// Reports a failed fetch. Whatever was shown before stays on screen.
    pub fn apply_fetch_failure(
        &mut self,
        request: RequestId,
        origin: FetchOrigin,
        message: &str,
    ) -> bool {
        if !self.requests.reject(request) {
            debug!(?request, "ignoring failure of superseded request");
            return false;
        }
        warn!(?origin, error = message, "forecast fetch failed");
        match origin {
            FetchOrigin::Startup => {
                self.loading_message = format!("Initial load failed: {message}");
            }
            FetchOrigin::Search => {
                self.notice = Some(format!("Weather fetch failed: {message}"));
            }
            FetchOrigin::Geolocation => {
                self.notice = Some(format!("Failed: {message}"));
            }
        }
        if self.weather.is_none() && origin != FetchOrigin::Startup {
            self.loading_message = "No weather loaded".to_string();
        }
        true
    }

    pub fn apply_geolocation_failure(
        &mut self,
        request: RequestId,
        error: &GeolocationError,
    ) -> bool {
        self.detecting = false;
        if !self.requests.reject(request) {
            return false;
        }
        warn!(error = %error, "location detection failed");
        self.notice = Some(
            match error {
                GeolocationError::Unsupported => "Geolocation not supported",
                _ => "Location denied or unavailable",
            }
            .to_string(),
        );
        true
    }

    /// Shows the first 24 hours of day `day_index`. Out-of-range indices
    /// leave the current window untouched and return `false`.
    pub fn select_day(&mut self, day_index: usize) -> bool {
        match window_for_day(&self.slices, day_index) {
            Some(window) => {
                self.window = Some(window);
                self.selected_day = Some(day_index);
                true
            }
            None => {
                debug!(day_index, days = self.slices.len(), "day selection ignored");
                false
            }
        }
    }

    pub fn move_selection(&mut self, delta: isize) -> Option<usize> {
        self.window.as_mut().map(|window| window.step(delta))
    }

    pub fn set_selection(&mut self, index: usize) -> Option<usize> {
        self.window.as_mut().map(|window| window.select(index))
    }

    pub fn toggle_units(&mut self) {
        self.units = self.units.toggled();
        debug!(units = ?self.units, "units toggled");
    }

    /// Chart samples in the active units; empty without a window.
    #[must_use]
    pub fn chart_values(&self) -> Vec<f32> {
        self.window
            .as_ref()
            .map(|window| window.display_values(self.units))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn hour_preview(&self) -> Option<HourPreview> {
        let window = self.window.as_ref()?;
        Some(HourPreview {
            hour: window.selected_time().hour(),
            temp: match self.units {
                Units::Celsius => round_temp(window.selected_temp_c()),
                Units::Fahrenheit => to_fahrenheit(window.selected_temp_c()),
            },
            units: self.units,
        })
    }

    #[must_use]
    pub fn headline(&self) -> Option<Classification> {
        self.weather.as_ref().and_then(ForecastBundle::headline)
    }

    pub(crate) fn on_suggest_due(&mut self, generation: u64, tx: &mpsc::Sender<AppEvent>) {
        if !self.debouncer.fire(generation) {
            return;
        }
        let query = self.query.trim().to_string();
        if query.is_empty() {
            self.suggestions = Suggestions::Hidden;
            return;
        }
        self.suggestions = Suggestions::Searching;
        self.spawn_suggestions(tx, generation, query);
    }

    /// Stores lookup results if they answer the latest query.
    pub fn apply_suggestions(&mut self, generation: u64, results: Vec<Location>) -> bool {
        if !self.debouncer.is_current(generation) {
            debug!(generation, "dropping superseded suggestions");
            return false;
        }
        self.suggestion_cursor = 0;
        self.suggestions = if results.is_empty() {
            Suggestions::NoResults
        } else {
            Suggestions::Results(results)
        };
        true
    }

    pub(crate) fn query_changed(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.debouncer.trigger(tx);
    }

    /// Takes suggestion `index`, fills the search bar with its label and
    /// issues a request id for its forecast.
    pub(crate) fn pick_suggestion(&mut self, index: usize) -> Option<(RequestId, Location)> {
        let Suggestions::Results(results) = &self.suggestions else {
            return None;
        };
        let location = results.get(index).cloned()?;
        self.debouncer.invalidate();
        self.query = location.display_name();
        self.suggestions = Suggestions::Hidden;
        self.focus = Focus::Dashboard;
        self.loading_message = format!("Loading {}...", self.query);
        Some((self.issue_request(), location))
    }

    pub fn select_suggestion(&mut self, index: usize, tx: &mpsc::Sender<AppEvent>) -> bool {
        let Some((request, location)) = self.pick_suggestion(index) else {
            return false;
        };
        self.spawn_forecast(tx, request, FetchOrigin::Search, location);
        true
    }

    /// Starts location detection unless one is already running.
    pub fn detect_location(&mut self, tx: &mpsc::Sender<AppEvent>) -> bool {
        let Some(request) = self.begin_detection() else {
            return false;
        };
        self.spawn_detection(tx, request);
        true
    }

    pub(crate) fn begin_detection(&mut self) -> Option<RequestId> {
        if self.detecting {
            return None;
        }
        self.detecting = true;
        Some(self.issue_request())
    }

    pub(crate) fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }
}

#[cfg(test)]
mod tests;
