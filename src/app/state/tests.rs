use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use super::*;
use crate::{
    app::debounce::manual::ManualScheduler,
    domain::series::HourlySeries,
    test_support::{fixed_now, sample_bundle, state_test_settings},
};

fn state() -> AppState {
    AppState::with_scheduler(state_test_settings(), Box::new(ManualScheduler::default()))
}

fn state_with_scheduler() -> (AppState, ManualScheduler) {
    let scheduler = ManualScheduler::default();
    let state = AppState::with_scheduler(state_test_settings(), Box::new(scheduler.clone()));
    (state, scheduler)
}

fn ready_state() -> AppState {
    let mut state = state();
    let request = state.requests.issue();
    assert!(state.apply_forecast(request, sample_bundle(), fixed_now()));
    state
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn chennai() -> Location {
    sample_bundle().location
}

#[test]
fn forecast_anchors_window_at_local_hour() {
    let state = ready_state();
    let window = state.window.as_ref().expect("window");

    assert_eq!(state.mode, AppMode::Ready);
    assert_eq!(window.len(), 24);
    assert_eq!(window.selected(), 0);
    assert_eq!(window.times()[0].hour(), 9);
    assert_eq!(state.slices.len(), 2);
    assert_eq!(state.query, "Chennai, Tamil Nadu, India");
}

#[test]
fn stale_forecast_never_replaces_newer_one() {
    let mut state = state();
    let first = state.requests.issue();
    let second = state.requests.issue();

    let mut newer = sample_bundle();
    newer.location.name = "Madurai".to_string();
    assert!(state.apply_forecast(second, newer, fixed_now()));

    let mut older = sample_bundle();
    older.location.name = "Delhi".to_string();
    assert!(!state.apply_forecast(first, older, fixed_now()));

    let shown = state.weather.as_ref().expect("weather");
    assert_eq!(shown.location.name, "Madurai");
}

#[test]
fn failure_after_success_keeps_series() {
    let mut state = ready_state();
    let before = state.chart_values();

    let request = state.requests.issue();
    assert!(state.apply_fetch_failure(request, FetchOrigin::Search, "status 500"));

    assert_eq!(state.chart_values(), before);
    assert!(state.weather.is_some());
    assert_eq!(
        state.notice.as_deref(),
        Some("Weather fetch failed: status 500")
    );
}

#[test]
fn startup_failure_is_not_a_notice() {
    let mut state = state();
    let request = state.requests.issue();
    state.apply_fetch_failure(request, FetchOrigin::Startup, "offline");

    assert!(state.notice.is_none());
    assert_eq!(state.mode, AppMode::Loading);
    assert!(state.loading_message.contains("offline"));
}

#[test]
fn failure_of_superseded_request_is_ignored() {
    let mut state = state();
    let old = state.requests.issue();
    let new = state.requests.issue();
    assert!(state.apply_forecast(new, sample_bundle(), fixed_now()));

    assert!(!state.apply_fetch_failure(old, FetchOrigin::Search, "timeout"));
    assert!(state.notice.is_none());
}

#[test]
fn empty_hourly_response_clears_window() {
    let mut state = ready_state();
    let mut bundle = sample_bundle();
    bundle.hourly = HourlySeries::default();

    let request = state.requests.issue();
    assert!(state.apply_forecast(request, bundle, fixed_now()));
    assert!(state.window.is_none());
    assert!(state.slices.is_empty());
    assert!(state.chart_values().is_empty());
}

#[test]
fn select_day_resets_slider_and_out_of_range_is_noop() {
    let mut state = ready_state();
    state.set_selection(5);

    assert!(state.select_day(1));
    let window = state.window.clone().expect("window");
    assert_eq!(window.selected(), 0);
    assert_eq!(window.times()[0].hour(), 0);
    assert_eq!(state.selected_day, Some(1));

    assert!(!state.select_day(7));
    assert_eq!(state.window, Some(window));
    assert_eq!(state.selected_day, Some(1));
}

#[test]
fn slider_clamps_into_window() {
    let mut state = ready_state();
    assert_eq!(state.move_selection(-1), Some(0));
    assert_eq!(state.set_selection(100), Some(23));
    assert_eq!(state.move_selection(1), Some(23));
}

#[test]
fn unit_toggle_rescales_without_refetch() {
    let mut state = ready_state();
    state.set_selection(0);
    let celsius = state.chart_values();

    state.toggle_units();
    let fahrenheit = state.chart_values();

    assert_eq!(state.units, Units::Fahrenheit);
    assert_eq!(celsius.len(), fahrenheit.len());
    // 28.5 °C at 09:00 → 83 °F
    assert_eq!(fahrenheit[0], 83.0_f32);
    assert_eq!(state.hour_preview().map(|p| p.temp), Some(83));
    assert_eq!(state.window.as_ref().map(DisplayWindow::selected), Some(0));
}

#[test]
fn hour_preview_follows_slider() {
    let mut state = ready_state();
    state.set_selection(3);
    let preview = state.hour_preview().expect("preview");
    assert_eq!(preview.label(), "12:00");
    assert_eq!(preview.temp, 30);
}

#[test]
fn geolocation_failure_message_depends_on_error() {
    let mut state = state();
    let request = state.begin_detection().expect("detection starts");
    assert!(state.detecting);
    state.apply_geolocation_failure(request, &GeolocationError::Denied);
    assert!(!state.detecting);
    assert_eq!(state.notice.as_deref(), Some("Location denied or unavailable"));

    let request = state.begin_detection().expect("detection restarts");
    state.apply_geolocation_failure(request, &GeolocationError::Unsupported);
    assert_eq!(state.notice.as_deref(), Some("Geolocation not supported"));
}

#[test]
fn detection_is_not_started_twice() {
    let mut state = state();
    assert!(state.begin_detection().is_some());
    assert!(state.begin_detection().is_none());
}

#[test]
fn stale_suggestions_are_dropped() {
    let (mut state, _scheduler) = state_with_scheduler();
    let (tx, _rx) = mpsc::channel(8);

    state.query = "Che".to_string();
    state.query_changed(&tx);
    let first = state.debouncer.generation();
    state.query.push('n');
    state.query_changed(&tx);

    assert!(!state.apply_suggestions(first, vec![chennai()]));
    assert_eq!(state.suggestions, Suggestions::Hidden);

    let current = state.debouncer.generation();
    assert!(state.apply_suggestions(current, Vec::new()));
    assert_eq!(state.suggestions, Suggestions::NoResults);
}

#[test]
fn empty_query_hides_suggestions_when_due() {
    let (mut state, _scheduler) = state_with_scheduler();
    let (tx, _rx) = mpsc::channel(8);
    state.suggestions = Suggestions::Results(vec![chennai()]);

    state.query.clear();
    state.query_changed(&tx);
    let generation = state.debouncer.generation();
    state.on_suggest_due(generation, &tx);

    assert_eq!(state.suggestions, Suggestions::Hidden);
}

#[test]
fn picking_a_suggestion_fills_query_and_issues_request() {
    let mut state = state();
    state.focus = Focus::Search;
    state.suggestions = Suggestions::Results(vec![chennai()]);

    let (request, location) = state.pick_suggestion(0).expect("picked");
    assert_eq!(location.name, "Chennai");
    assert_eq!(state.query, "Chennai, Tamil Nadu, India");
    assert_eq!(state.suggestions, Suggestions::Hidden);
    assert_eq!(state.focus, Focus::Dashboard);
    assert!(!state.requests.is_stale(request));

    assert!(state.pick_suggestion(0).is_none());
}

#[tokio::test]
async fn typing_in_search_schedules_one_lookup_per_keystroke() {
    let (mut state, scheduler) = state_with_scheduler();
    let (tx, _rx) = mpsc::channel(8);
    state.focus = Focus::Search;

    for ch in ['O', 's', 'l', 'o'] {
        state
            .handle_event(AppEvent::Input(key(KeyCode::Char(ch))), &tx)
            .await
            .expect("typing");
    }

    assert_eq!(state.query, "Oslo");
    assert_eq!(scheduler.scheduled(), 4);
    assert_eq!(scheduler.armed().len(), 1);
}

#[tokio::test]
async fn dashboard_keys_drive_controller() {
    let mut state = ready_state();
    let (tx, mut rx) = mpsc::channel(8);

    state
        .handle_event(AppEvent::Input(key(KeyCode::Right)), &tx)
        .await
        .expect("right");
    assert_eq!(state.window.as_ref().map(DisplayWindow::selected), Some(1));

    state
        .handle_event(AppEvent::Input(key(KeyCode::Char('2'))), &tx)
        .await
        .expect("day");
    assert_eq!(state.selected_day, Some(1));

    state
        .handle_event(AppEvent::Input(key(KeyCode::Char('u'))), &tx)
        .await
        .expect("units");
    assert_eq!(state.units, Units::Fahrenheit);

    state
        .handle_event(AppEvent::Input(key(KeyCode::Char('q'))), &tx)
        .await
        .expect("quit");
    assert!(matches!(rx.recv().await, Some(AppEvent::Quit)));
}

#[tokio::test]
async fn any_key_dismisses_notice_first() {
    let mut state = ready_state();
    let (tx, _rx) = mpsc::channel(8);
    state.notice = Some("Location denied or unavailable".to_string());

    state
        .handle_event(AppEvent::Input(key(KeyCode::Char('u'))), &tx)
        .await
        .expect("dismiss");

    assert!(state.notice.is_none());
    assert_eq!(state.units, Units::Celsius);
}

#[tokio::test]
async fn ctrl_c_quits_from_search() {
    let mut state = state();
    let (tx, mut rx) = mpsc::channel(8);
    state.focus = Focus::Search;

    state
        .handle_event(
            AppEvent::Input(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
            &tx,
        )
        .await
        .expect("ctrl+c");

    assert!(matches!(rx.recv().await, Some(AppEvent::Quit)));
    assert!(state.query.is_empty());
}

#[tokio::test]
async fn geolocation_events_clear_detecting_flag() {
    let mut state = state();
    let (tx, _rx) = mpsc::channel(8);
    let request = state.begin_detection().expect("detecting");

    state
        .handle_event(
            AppEvent::ForecastReady {
                request,
                origin: FetchOrigin::Geolocation,
                bundle: sample_bundle(),
            },
            &tx,
        )
        .await
        .expect("ready");

    assert!(!state.detecting);
    assert!(state.weather.is_some());
}
