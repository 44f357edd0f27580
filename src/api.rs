//! OpenWeatherMap current-weather client

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::icons::WeatherIcon;
use crate::state::{UnitPreference, WeatherReading};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

// ============================================================================
// Wire format
// ============================================================================

/// Current-weather payload. Every block is optional; the provider omits
/// fields freely (no `visibility` in fog reports, no `sys` for some stations).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CurrentWeatherPayload {
    main: Option<MainBlock>,
    wind: Option<WindBlock>,
    sys: Option<SysBlock>,
    weather: Option<Vec<ConditionBlock>>,
    /// Metres
    visibility: Option<f64>,
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MainBlock {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WindBlock {
    speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SysBlock {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConditionBlock {
    description: Option<String>,
    icon: Option<String>,
}

fn floor_or_zero(value: Option<f64>) -> i32 {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.floor() as i32)
        .unwrap_or(0)
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl CurrentWeatherPayload {
    /// Location name as resolved by the provider, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Normalize into a reading, defaulting whatever is missing
    pub fn into_reading(self) -> WeatherReading {
        let main = self.main.unwrap_or_default();
        let wind = self.wind.unwrap_or_default();
        let sys = self.sys.unwrap_or_default();
        let condition = self
            .weather
            .and_then(|conditions| conditions.into_iter().next())
            .unwrap_or_default();

        WeatherReading {
            temperature: floor_or_zero(main.temp),
            feels_like: floor_or_zero(main.feels_like),
            humidity: finite_or_zero(main.humidity).clamp(0.0, 100.0) as u8,
            wind_speed: finite_or_zero(wind.speed).max(0.0),
            pressure: finite_or_zero(main.pressure).round() as i32,
            visibility: finite_or_zero(self.visibility) / 1000.0,
            location: self.name.unwrap_or_default(),
            country: sys.country.unwrap_or_default(),
            description: condition.description.unwrap_or_default(),
            icon: WeatherIcon::from_code(condition.icon.as_deref().unwrap_or_default()),
            sunrise: sys.sunrise,
            sunset: sys.sunset,
        }
    }
}

/// Classify a non-success status. `query` names what was asked for.
pub fn classify_status(status: StatusCode, query: &str) -> FetchError {
    if status == StatusCode::NOT_FOUND {
        return FetchError::NotFound(query.to_string());
    }
    FetchError::Upstream {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

/// Parse a success body
pub fn parse_payload(body: &str) -> Result<CurrentWeatherPayload, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current weather for a city name
    pub async fn current_by_city(
        &self,
        city: &str,
        unit: UnitPreference,
    ) -> Result<CurrentWeatherPayload, FetchError> {
        self.current(&[("q", city.to_string())], unit, city).await
    }

    /// Current weather for a coordinate pair (used for reverse lookup)
    pub async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
        unit: UnitPreference,
    ) -> Result<CurrentWeatherPayload, FetchError> {
        let label = format!("{lat:.4}, {lon:.4}");
        self.current(
            &[("lat", lat.to_string()), ("lon", lon.to_string())],
            unit,
            &label,
        )
        .await
    }

    async fn current(
        &self,
        location: &[(&str, String)],
        unit: UnitPreference,
        label: &str,
    ) -> Result<CurrentWeatherPayload, FetchError> {
        debug!(location = label, units = unit.token(), "requesting current weather");

        let response = self
            .http
            .get(&self.base_url)
            .query(location)
            .query(&[("units", unit.token()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(location = label, %status, "weather request rejected");
            return Err(classify_status(status, label));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        parse_payload(&body)
    }
}
