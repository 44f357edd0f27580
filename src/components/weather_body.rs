use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::location_header::HEADER_OVERHEAD;
use super::{Component, ERROR_ICON, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::icons::SPRITE_HEIGHT;
use crate::state::{AppState, DisplayMode, UnitPreference, WeatherReading};

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
}

/// Fixed rows: 2 blanks, description, feels-like, blank, 3 detail rows, notice.
const LAYOUT_FIXED: u16 = 9;

/// Text cap tiers: (header_cap, temp_cap).
/// terminus(6), miniwi(4), plain(1), with HEADER_OVERHEAD added to header.
const TEXT_TIERS: [(u16, u16); 3] = [
    (6 + HEADER_OVERHEAD, 6), // terminus for both
    (4 + HEADER_OVERHEAD, 4), // miniwi for both
    (1 + HEADER_OVERHEAD, 1), // plain for both
];

fn font_stack() -> Vec<artbox::Font> {
    fonts::stack(&["terminus", "miniwi"])
}

struct LayoutSizing {
    show_sprite: bool,
    icon_h: u16,
    header_cap: u16,
    temp_cap: u16,
}

/// Shrink text caps until the sprite fits; emoji only when even plain text
/// leaves no room for it.
fn compute_layout(area_height: u16) -> LayoutSizing {
    for &(hcap, tcap) in &TEXT_TIERS {
        let budget = area_height.saturating_sub(hcap + tcap + LAYOUT_FIXED);
        if budget >= SPRITE_HEIGHT {
            return LayoutSizing {
                show_sprite: true,
                icon_h: SPRITE_HEIGHT,
                header_cap: hcap,
                temp_cap: tcap,
            };
        }
    }
    let (hcap, tcap) = TEXT_TIERS[0];
    LayoutSizing {
        show_sprite: false,
        icon_h: 1,
        header_cap: hcap,
        temp_cap: tcap,
    }
}

// ============================================================================
// Component
// ============================================================================

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let sizing = compute_layout(area.height);

        match WeatherView::from_state(props.state) {
            WeatherView::Ready(reading) => {
                render_ready(frame, area, props.state, reading, &sizing);
            }
            WeatherView::Loading => {
                render_placeholder(
                    frame,
                    area,
                    props.state,
                    &sizing,
                    Line::from(Span::styled(
                        "Loading weather data...",
                        Style::default().fg(Color::DarkGray),
                    )),
                );
            }
            WeatherView::Error(error) => render_error(frame, area, error),
            WeatherView::Empty => {
                let hint = Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                    Span::styled("/", Style::default().fg(Color::Cyan).bold()),
                    Span::styled(" to search for a city", Style::default().fg(Color::DarkGray)),
                ]);
                render_placeholder(frame, area, props.state, &sizing, hint);
            }
        }
    }
}

fn make_layout(area: Rect, sizing: &LayoutSizing) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Max(sizing.header_cap),
        Constraint::Length(1),
        Constraint::Length(sizing.icon_h),
        Constraint::Length(1),
        Constraint::Max(sizing.temp_cap),
        Constraint::Length(1), // Description
        Constraint::Length(1), // Feels like
        Constraint::Length(1),
        Constraint::Length(3), // Details
        Constraint::Length(1), // Notice
    ])
    .flex(Flex::Center)
    .split(area)
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, title: &str, subtitle: &str) {
    let mut header = LocationHeader;
    header.render(
        frame,
        area,
        LocationHeaderProps {
            title,
            subtitle,
            show_ramadan: state.show_ramadan_banner(),
            temperature_c: state
                .reading
                .as_ref()
                .map(|r| state.unit.to_celsius(r.temperature as f32)),
            mode: state.mode,
            is_animating: state.loading_anim_active(),
            tick_count: state.tick_count,
        },
    );
}

fn render_ready(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    reading: &WeatherReading,
    sizing: &LayoutSizing,
) {
    let chunks = make_layout(area, sizing);

    render_header(frame, chunks[0], state, &reading.location, &reading.country);

    if sizing.show_sprite {
        frame.render_widget(
            Paragraph::new(reading.icon.sprite()).alignment(Alignment::Center),
            chunks[2],
        );
    } else {
        frame.render_widget(
            Paragraph::new(Line::from(reading.icon.emoji()).centered()),
            chunks[2],
        );
    }

    let temp_text = state.unit.format_temperature(reading.temperature);
    let renderer = Renderer::new(font_stack())
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_gradient(
            state.unit.to_celsius(reading.temperature as f32),
            state.mode,
        ));
    frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[4]);

    let desc = Line::from(vec![Span::styled(
        reading.description.clone(),
        Style::default().fg(Color::Gray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(desc), chunks[5]);

    let feels = Line::from(vec![Span::styled(
        format!(
            "Feels like {}",
            state.unit.format_temperature(reading.feels_like)
        ),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(feels), chunks[6]);

    frame.render_widget(
        Paragraph::new(detail_lines(reading, state.unit)),
        chunks[8],
    );

    // Validation errors leave the last reading on screen
    if let Some(error) = &state.error {
        frame.render_widget(Paragraph::new(error_notice(error)), chunks[9]);
    }
}

fn render_placeholder(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    sizing: &LayoutSizing,
    message: Line<'static>,
) {
    let chunks = make_layout(area, sizing);
    let title = state.last_query.as_deref().unwrap_or("Weather");
    render_header(frame, chunks[0], state, title, "");

    frame.render_widget(Paragraph::new(message.centered()), chunks[5]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // blank
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to retry, ", Style::default().fg(Color::DarkGray)),
                Span::styled("x", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to dismiss", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[5],
    );
}

// ============================================================================
// Helpers
// ============================================================================

enum WeatherView<'a> {
    Ready(&'a WeatherReading),
    Loading,
    Error(&'a str),
    Empty,
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        if let Some(reading) = &state.reading {
            return WeatherView::Ready(reading);
        }
        if state.is_loading() {
            return WeatherView::Loading;
        }
        match &state.error {
            Some(error) => WeatherView::Error(error),
            None => WeatherView::Empty,
        }
    }
}

fn error_notice(error: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{ERROR_ICON} ")),
        Span::styled(error.to_string(), Style::default().fg(Color::Rgb(200, 100, 100))),
    ])
    .centered()
}

fn detail(label: &'static str, value: String) -> [Span<'static>; 2] {
    [
        Span::styled(format!("{label} "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White).bold()),
    ]
}

fn detail_row(left: [Span<'static>; 2], right: Option<[Span<'static>; 2]>) -> Line<'static> {
    let mut spans = left.to_vec();
    if let Some(right) = right {
        spans.push(Span::raw("    "));
        spans.extend(right);
    }
    Line::from(spans).centered()
}

fn detail_lines(reading: &WeatherReading, unit: UnitPreference) -> Vec<Line<'static>> {
    let mut lines = vec![
        detail_row(
            detail("Humidity", format!("{}%", reading.humidity)),
            Some(detail(
                "Wind",
                format!("{} {}", reading.wind_speed, unit.speed_label()),
            )),
        ),
        detail_row(
            detail("Pressure", format!("{} hPa", reading.pressure)),
            Some(detail("Visibility", format!("{} km", reading.visibility))),
        ),
    ];

    let sunrise = reading.sunrise.map(|ts| detail("Sunrise", clock_time(ts)));
    let sunset = reading.sunset.map(|ts| detail("Sunset", clock_time(ts)));
    match (sunrise, sunset) {
        (Some(rise), set) => lines.push(detail_row(rise, set)),
        (None, Some(set)) => lines.push(detail_row(set, None)),
        (None, None) => {}
    }
    lines
}

/// Local `HH:MM` for a Unix timestamp
fn clock_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn temperature_gradient(celsius: f32, mode: DisplayMode) -> Fill {
    let (start, end) = match (mode, celsius) {
        (DisplayMode::Night, _) => (
            ArtColor::rgb(120, 130, 210),
            ArtColor::rgb(190, 190, 235),
        ),
        (_, t) if t < 0.0 => (
            ArtColor::rgb(150, 200, 255),
            ArtColor::rgb(200, 230, 255),
        ),
        (_, t) if t < 15.0 => (
            ArtColor::rgb(100, 180, 255),
            ArtColor::rgb(150, 220, 200),
        ),
        (_, t) if t < 25.0 => (
            ArtColor::rgb(100, 200, 150),
            ArtColor::rgb(255, 220, 100),
        ),
        (_, t) if t < 35.0 => (
            ArtColor::rgb(255, 180, 80),
            ArtColor::rgb(255, 120, 80),
        ),
        _ => (
            ArtColor::rgb(255, 100, 80),
            ArtColor::rgb(255, 60, 60),
        ),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
