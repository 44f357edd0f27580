//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::error::FetchError;
use crate::history;
use crate::state::{AppState, DisplayMode, FetchStatus, LOADING_ANIM_CYCLE_TICKS};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherSearch(city) => search(state, &city),

        Action::WeatherRefresh => match state.last_query.clone() {
            Some(city) => search(state, &city),
            None => DispatchResult::unchanged(),
        },

        Action::WeatherDidLoad(report) => {
            let reading = report.reading;
            state.mode = DisplayMode::at(report.received_at, reading.sunrise, reading.sunset);
            let history_changed = state.history.record(reading.history_entry());
            state.reading = Some(reading);
            state.status = FetchStatus::Success;
            state.error = None;
            finish_loading(state);

            if history_changed {
                DispatchResult::changed_with(Effect::SaveHistory {
                    entries: state.history.entries().to_vec(),
                })
            } else {
                DispatchResult::changed()
            }
        }

        Action::WeatherDidError(msg) => {
            state.reading = None;
            state.status = FetchStatus::Failure;
            state.error = Some(msg);
            finish_loading(state);
            DispatchResult::changed()
        }

        // ===== Geolocation actions =====
        Action::GeoLocate => DispatchResult::changed_with(Effect::Locate { unit: state.unit }),

        Action::GeoDidResolve(city) => search(state, &city),

        Action::GeoDidFail(_) => {
            let city = state.default_city.clone();
            search(state, &city)
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_query.clear();
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            close_search(state);
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchSelect(index) => {
            if index < state.history.len() && index != state.search_selected {
                state.search_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== History actions =====
        Action::HistoryPick(index) => {
            let Some(city) = state.history.get(index).map(|e| history::city_of(e).to_string())
            else {
                return DispatchResult::unchanged();
            };
            search(state, &city)
        }

        Action::HistoryDidSave | Action::HistoryDidError(_) => DispatchResult::unchanged(),

        // ===== UI actions =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            match state.reading.as_ref().map(|r| r.location.clone()) {
                Some(location) => search(state, &location),
                None => DispatchResult::changed(),
            }
        }

        Action::ErrorDismiss => {
            if state.error.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            let animating = state.loading_anim_active();
            if animating {
                state.tick_count = state.tick_count.wrapping_add(1);
                if state.loading_anim_ticks_remaining > 0 {
                    state.loading_anim_ticks_remaining -= 1;
                }
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Validate `city` and start a fetch for it
fn search(state: &mut AppState, city: &str) -> DispatchResult<Effect> {
    let city = city.trim();
    if city.is_empty() {
        state.error = Some(FetchError::EmptyQuery.to_string());
        return DispatchResult::changed();
    }

    state.status = FetchStatus::Loading;
    state.error = None;
    state.last_query = Some(city.to_string());
    state.tick_count = 0;
    state.loading_anim_ticks_remaining = 0;
    DispatchResult::changed_with(Effect::FetchWeather {
        city: city.to_string(),
        unit: state.unit,
    })
}

fn finish_loading(state: &mut AppState) {
    state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
    close_search(state);
}

fn close_search(state: &mut AppState) {
    state.search_mode = false;
    state.search_query.clear();
    state.search_selected = 0;
}

fn ticks_to_phase_zero(tick_count: u32) -> u32 {
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    if tick_count == 0 {
        return cycle;
    }
    let remainder = tick_count % cycle;
    if remainder == 0 { 0 } else { cycle - remainder }
}
