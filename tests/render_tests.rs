//! Render tests using RenderHarness
//!
//! FRAMEWORK PATTERN: RenderHarness
//! - Create harness with terminal dimensions
//! - Render component to test buffer
//! - Convert to string and look for visible text

use tui_dispatch::testing::*;
use weather_app::{
    components::{Component, RAMADAN_BANNER, WeatherPanel, WeatherPanelProps},
    icons::WeatherIcon,
    state::{AppState, DisplayMode, FetchStatus, UnitPreference, WeatherReading},
};

fn render_panel(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = WeatherPanel;
    render.render_to_string_plain(|frame| {
        let props = WeatherPanelProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

fn rainy_reading() -> WeatherReading {
    WeatherReading {
        temperature: 15,
        feels_like: 14,
        humidity: 82,
        wind_speed: 4.1,
        pressure: 1012,
        visibility: 10.0,
        location: "London".into(),
        country: "GB".into(),
        description: "light rain".into(),
        icon: WeatherIcon::Rain,
        sunrise: None,
        sunset: None,
    }
}

fn ready(reading: WeatherReading) -> AppState {
    AppState {
        reading: Some(reading),
        status: FetchStatus::Success,
        last_query: Some("London".into()),
        ..Default::default()
    }
}

#[test]
fn test_render_ready_state() {
    let output = render_panel(&ready(rainy_reading()), 80, 32);

    assert!(output.contains("light rain"), "Should show description");
    assert!(output.contains("GB"), "Should show country");
    assert!(output.contains("Humidity 82%"), "Should show humidity");
    assert!(output.contains("Pressure 1012 hPa"), "Should show pressure");
    assert!(output.contains("Visibility 10 km"), "Should show visibility");
    assert!(output.contains("Wind 4.1 m/s"), "Should show metric wind");
    assert!(output.contains("Feels like 14°C"), "Should show feels like");
}

#[test]
fn test_render_imperial_labels() {
    let state = AppState {
        unit: UnitPreference::Imperial,
        ..ready(rainy_reading())
    };
    let output = render_panel(&state, 80, 32);

    assert!(output.contains("Feels like 14°F"));
    assert!(output.contains("mph"));
    assert!(output.contains("units °C"), "Hint offers the other unit");
}

#[test]
fn test_render_small_terminal_uses_emoji() {
    // Too short for the sprite; must still render the reading
    let output = render_panel(&ready(rainy_reading()), 60, 14);
    assert!(output.contains("light rain"), "Should show description:\n{output}");
}

#[test]
fn test_render_loading_state() {
    let state = AppState {
        status: FetchStatus::Loading,
        last_query: Some("Paris".into()),
        tick_count: 12,
        ..Default::default()
    };
    let output = render_panel(&state, 60, 24);

    assert!(output.contains("Loading weather data"));
}

#[test]
fn test_render_error_state() {
    let state = AppState {
        status: FetchStatus::Failure,
        error: Some("City \"Atlantis\" not found".into()),
        ..Default::default()
    };
    let output = render_panel(&state, 60, 20);

    assert!(output.contains("Error"), "Should show error label");
    assert!(
        output.contains("City \"Atlantis\" not found"),
        "Should show error message"
    );
    assert!(output.contains("retry"), "Should show retry hint");
}

#[test]
fn test_render_validation_error_keeps_reading() {
    let state = AppState {
        error: Some("Please enter a city name".into()),
        ..ready(rainy_reading())
    };
    let output = render_panel(&state, 80, 32);

    assert!(output.contains("light rain"), "Reading stays visible");
    assert!(output.contains("Please enter a city name"));
}

#[test]
fn test_render_help_bar() {
    let output = render_panel(&AppState::default(), 80, 24);

    assert!(output.contains("search"), "Should show search hint");
    assert!(output.contains("refresh"), "Should show refresh hint");
    assert!(output.contains("units"), "Should show units hint");
    assert!(output.contains("quit"), "Should show quit hint");
}

#[test]
fn test_render_initial_state() {
    let output = render_panel(&AppState::default(), 60, 20);

    assert!(
        output.contains("to search for a city"),
        "Should show search prompt"
    );
}

#[test]
fn test_render_ramadan_banner_at_night() {
    let banner_text = RAMADAN_BANNER.trim_start_matches('\u{262a}').trim();

    let night = AppState {
        is_ramadan: true,
        mode: DisplayMode::Night,
        ..ready(rainy_reading())
    };
    let output = render_panel(&night, 80, 32);
    assert!(output.contains(banner_text), "Banner at night:\n{output}");

    let day = AppState {
        mode: DisplayMode::Day,
        ..night
    };
    let output = render_panel(&day, 80, 32);
    assert!(!output.contains(banner_text), "No banner by day");
}
