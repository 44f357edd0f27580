//! Action and state tests using TestHarness
//!
//! FRAMEWORK PATTERN: TestHarness
//! - Create harness with initial state
//! - Emit actions to simulate user/async events
//! - Drain and assert emitted actions

use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};
use weather_app::{
    action::Action,
    components::{Component, WeatherPanel, WeatherPanelProps},
    effect::Effect,
    history::SearchHistory,
    reducer::reducer,
    state::{AppState, FetchStatus, PanelSettings, UnitPreference, WeatherReading, WeatherReport},
};

fn report(location: &str) -> WeatherReport {
    WeatherReport {
        reading: WeatherReading {
            temperature: 18,
            location: location.into(),
            country: "FR".into(),
            description: "few clouds".into(),
            ..Default::default()
        },
        received_at: 0,
    }
}

#[test]
fn test_reducer_weather_search() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert_eq!(store.state().status, FetchStatus::Idle);

    let result = store.dispatch(Action::WeatherSearch("Paris".into()));
    assert!(result.changed, "State should change");
    assert!(store.state().is_loading());
    assert_eq!(result.effects.len(), 1);
    assert_eq!(
        result.effects[0],
        Effect::FetchWeather {
            city: "Paris".into(),
            unit: UnitPreference::Metric,
        }
    );
}

#[test]
fn test_reducer_blank_search_is_rejected() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::WeatherSearch("   ".into()));
    assert!(result.effects.is_empty(), "No request for a blank query");
    assert_eq!(store.state().error.as_deref(), Some("Please enter a city name"));
    assert_eq!(store.state().status, FetchStatus::Idle);
}

#[test]
fn test_reducer_weather_load() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::WeatherSearch("Paris".into()));
    let result = store.dispatch(Action::WeatherDidLoad(report("Paris")));

    assert_eq!(store.state().status, FetchStatus::Success);
    assert_eq!(
        store.state().reading.as_ref().map(|r| r.location.as_str()),
        Some("Paris")
    );
    assert_eq!(store.state().history.entries(), ["Paris, FR"]);
    assert!(matches!(result.effects[..], [Effect::SaveHistory { .. }]));
}

#[test]
fn test_reducer_toggle_units() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert_eq!(store.state().unit, UnitPreference::Metric);
    let result = store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, UnitPreference::Imperial);
    assert!(result.effects.is_empty(), "Nothing to re-fetch yet");

    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, UnitPreference::Metric);
}

#[test]
fn test_startup_settings() {
    let state = AppState::new(PanelSettings {
        unit: UnitPreference::Imperial,
        default_city: "Cairo".into(),
        is_ramadan: true,
        history: SearchHistory::from_entries(vec!["Oslo, NO".into()]),
    });

    assert_eq!(state.unit, UnitPreference::Imperial);
    assert_eq!(state.default_city, "Cairo");
    assert!(state.is_ramadan);
    assert_eq!(state.history.entries(), ["Oslo, NO"]);
    assert!(state.reading.is_none());
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherPanel;

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = WeatherPanelProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::WeatherRefresh);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherPanel;

    let actions = harness.send_keys::<NumericComponentId, _, _>("r q u", |state, event| {
        let props = WeatherPanelProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::WeatherDidLoad(WeatherReport::default());
    let toggle = Action::UiToggleUnits;
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("weather_did"));
    assert_eq!(toggle.category(), Some("ui"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_weather_did());
    assert!(toggle.is_ui());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::GeoLocate);
    harness.emit(Action::GeoDidFail("denied".into()));
    harness.emit(Action::WeatherDidError("oops".into()));

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::WeatherSearch("Lima".into()),
        Action::WeatherDidLoad(report("Lima")),
    ];

    assert_emitted!(actions, Action::WeatherSearch(_));
    assert_emitted!(actions, Action::WeatherDidLoad(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::WeatherDidError(_));
}

#[test]
fn test_unit_formatting() {
    assert_eq!(UnitPreference::Metric.format_temperature(15), "15°C");
    assert_eq!(UnitPreference::Imperial.format_temperature(-3), "-3°F");
    assert_eq!(UnitPreference::Metric.speed_label(), "m/s");
    assert_eq!(UnitPreference::Imperial.speed_label(), "mph");
}
