use crossterm::event::{Event, EventStream};
use futures::StreamExt;

use crate::{
    app::requests::RequestId,
    data::geolocate::GeolocationError,
    domain::weather::{ForecastBundle, Location},
};

/// What started a forecast request; decides how failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Startup,
    Search,
    Geolocation,
}

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    Input(Event),
    SuggestDue {
        generation: u64,
    },
    SuggestionsReady {
        generation: u64,
        results: Vec<Location>,
    },
    ForecastReady {
        request: RequestId,
        origin: FetchOrigin,
        bundle: ForecastBundle,
    },
    ForecastFailed {
        request: RequestId,
        origin: FetchOrigin,
        message: String,
    },
    GeolocationFailed {
        request: RequestId,
        error: GeolocationError,
    },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}
