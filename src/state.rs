//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::history::SearchHistory;
use crate::icons::WeatherIcon;

/// Normalized current-conditions snapshot.
///
/// Every field has a zero/empty default, so a sparse provider payload never
/// leaves anything unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReading {
    pub temperature: i32,
    pub feels_like: i32,
    /// Relative humidity, percent
    pub humidity: u8,
    pub wind_speed: f64,
    /// hPa
    pub pressure: i32,
    /// Kilometres
    pub visibility: f64,
    pub location: String,
    pub country: String,
    pub description: String,
    pub icon: WeatherIcon,
    /// Unix seconds
    pub sunrise: Option<i64>,
    /// Unix seconds
    pub sunset: Option<i64>,
}

impl WeatherReading {
    /// History entry for this reading
    pub fn history_entry(&self) -> String {
        format!("{}, {}", self.location, self.country)
    }
}

/// A reading plus the moment its response arrived
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub reading: WeatherReading,
    /// Unix seconds
    pub received_at: i64,
}

impl WeatherReport {
    pub fn received_now(reading: WeatherReading) -> Self {
        Self {
            reading,
            received_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Unit system sent to the provider
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum UnitPreference {
    #[default]
    Metric,
    Imperial,
}

impl UnitPreference {
    pub fn toggle(&self) -> Self {
        match self {
            UnitPreference::Metric => UnitPreference::Imperial,
            UnitPreference::Imperial => UnitPreference::Metric,
        }
    }

    /// Query token understood by the provider
    pub fn token(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "metric",
            UnitPreference::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "°C",
            UnitPreference::Imperial => "°F",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "m/s",
            UnitPreference::Imperial => "mph",
        }
    }

    pub fn format_temperature(&self, degrees: i32) -> String {
        format!("{}{}", degrees, self.temperature_symbol())
    }

    /// Convert a temperature in this unit to Celsius
    pub fn to_celsius(&self, degrees: f32) -> f32 {
        match self {
            UnitPreference::Metric => degrees,
            UnitPreference::Imperial => (degrees - 32.0) * 5.0 / 9.0,
        }
    }
}

/// Day/night theming
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum DisplayMode {
    #[default]
    Day,
    Night,
}

impl DisplayMode {
    /// `Day` only when `now` lies strictly between sunrise and sunset
    pub fn at(now: i64, sunrise: Option<i64>, sunset: Option<i64>) -> Self {
        match (sunrise, sunset) {
            (Some(rise), Some(set)) if now > rise && now < set => DisplayMode::Day,
            _ => DisplayMode::Night,
        }
    }
}

/// Fetch lifecycle: Idle → Loading → Success/Failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

/// Animation timing for the header gradient seam.
pub const LOADING_ANIM_TICK_MS: u64 = 15;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

pub const DEFAULT_CITY: &str = "London";

/// Start-up inputs for [`AppState::new`]
#[derive(Clone, Debug)]
pub struct PanelSettings {
    pub unit: UnitPreference,
    pub default_city: String,
    pub is_ramadan: bool,
    pub history: SearchHistory,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            unit: UnitPreference::default(),
            default_city: DEFAULT_CITY.into(),
            is_ramadan: false,
            history: SearchHistory::default(),
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Last successful reading; cleared on failure
    #[debug(section = "Weather", label = "Reading", debug_fmt)]
    pub reading: Option<WeatherReading>,

    #[debug(section = "Weather", label = "Status", debug_fmt)]
    pub status: FetchStatus,

    /// User-visible error message
    #[debug(section = "Weather", label = "Error", debug_fmt)]
    pub error: Option<String>,

    /// Most recent city passed to a fetch
    #[debug(section = "Weather", label = "Last query", debug_fmt)]
    pub last_query: Option<String>,

    #[debug(section = "Preferences", label = "Unit", debug_fmt)]
    pub unit: UnitPreference,

    #[debug(section = "Preferences", label = "Mode", debug_fmt)]
    pub mode: DisplayMode,

    #[debug(section = "Preferences", label = "Ramadan")]
    pub is_ramadan: bool,

    #[debug(section = "Preferences", label = "Default city")]
    pub default_city: String,

    #[debug(section = "History", label = "Recent", debug_fmt)]
    pub history: SearchHistory,

    // --- Animation internals (skipped) ---
    /// Animation frame counter (for gradient seam)
    #[debug(skip)]
    pub tick_count: u32,

    /// Remaining ticks to finish the current animation cycle after loading
    #[debug(skip)]
    pub loading_anim_ticks_remaining: u32,

    // --- Search mode (skipped) ---
    /// Whether search overlay is open
    #[debug(skip)]
    pub search_mode: bool,

    /// Current search query
    #[debug(skip)]
    pub search_query: String,

    /// Highlighted history entry in the overlay
    #[debug(skip)]
    pub search_selected: usize,
}

impl AppState {
    pub fn new(settings: PanelSettings) -> Self {
        Self {
            reading: None,
            status: FetchStatus::Idle,
            error: None,
            last_query: None,
            unit: settings.unit,
            mode: DisplayMode::default(),
            is_ramadan: settings.is_ramadan,
            default_city: settings.default_city,
            history: settings.history,
            tick_count: 0,
            loading_anim_ticks_remaining: 0,
            search_mode: false,
            search_query: String::new(),
            search_selected: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Ramadan banner only shows at night
    pub fn show_ramadan_banner(&self) -> bool {
        self.is_ramadan && self.mode == DisplayMode::Night
    }

    pub fn loading_anim_active(&self) -> bool {
        self.is_loading() || self.loading_anim_ticks_remaining > 0
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PanelSettings::default())
    }
}
