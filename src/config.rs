//! Resolved runtime settings

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{WeatherClient, DEFAULT_BASE_URL};
use crate::geolocation::{Coordinates, FixedPosition, Geolocator, IpGeolocator, Unavailable};
use crate::state::{UnitPreference, DEFAULT_CITY};

pub const APP_DIR: &str = "weather-app";
pub const HISTORY_FILE: &str = "recent_searches.json";

/// Where the start-up position comes from
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeolocationSource {
    /// No capability: fall back to the default city
    Disabled,
    Fixed(Coordinates),
    IpLookup,
}

impl GeolocationSource {
    pub fn from_flags(lat: Option<f64>, lon: Option<f64>, locate: bool) -> Self {
        match (lat, lon) {
            (Some(lat), Some(lon)) => GeolocationSource::Fixed(Coordinates { lat, lon }),
            _ if locate => GeolocationSource::IpLookup,
            _ => GeolocationSource::Disabled,
        }
    }

    pub fn geolocator(&self) -> Arc<dyn Geolocator> {
        match *self {
            GeolocationSource::Disabled => Arc::new(Unavailable),
            GeolocationSource::Fixed(position) => Arc::new(FixedPosition(position)),
            GeolocationSource::IpLookup => Arc::new(IpGeolocator::new()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Absent key is sent empty; the provider rejects it with 401
    pub api_key: Option<String>,
    pub api_url: String,
    pub default_city: String,
    pub unit: UnitPreference,
    pub history_path: PathBuf,
    pub geolocation: GeolocationSource,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_BASE_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            unit: UnitPreference::default(),
            history_path: default_history_path(),
            geolocation: GeolocationSource::Disabled,
        }
    }
}

impl AppConfig {
    pub fn weather_client(&self) -> WeatherClient {
        WeatherClient::new(self.api_key.clone().unwrap_or_default()).with_base_url(&self.api_url)
    }
}

/// `<data_local_dir>/weather-app/recent_searches.json`, or the working
/// directory when the platform has no data dir
pub fn default_history_path() -> PathBuf {
    dirs_next::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(HISTORY_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geolocation_source_from_flags() {
        assert_eq!(
            GeolocationSource::from_flags(Some(1.0), Some(2.0), true),
            GeolocationSource::Fixed(Coordinates { lat: 1.0, lon: 2.0 })
        );
        assert_eq!(
            GeolocationSource::from_flags(None, None, true),
            GeolocationSource::IpLookup
        );
        assert_eq!(
            GeolocationSource::from_flags(Some(1.0), None, false),
            GeolocationSource::Disabled
        );
    }

    #[test]
    fn test_default_history_path() {
        let path = default_history_path();
        assert!(path.ends_with(HISTORY_FILE));
    }

    #[test]
    fn test_weather_client_uses_configured_url() {
        let config = AppConfig {
            api_url: "http://localhost:8080/weather".into(),
            ..Default::default()
        };
        assert_eq!(config.weather_client().base_url(), "http://localhost:8080/weather");
    }
}
