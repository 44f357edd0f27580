//! Start-up position lookup
//!
//! A terminal has no permission prompt, so "granting" geolocation means
//! passing a position on the command line or opting into an IP lookup.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::api::WeatherClient;
use crate::error::GeolocationError;
use crate::state::UnitPreference;

pub const IP_LOOKUP_URL: &str = "http://ip-api.com/json";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// No geolocation capability; behaves like a refused permission
pub struct Unavailable;

#[async_trait]
impl Geolocator for Unavailable {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Denied)
    }
}

/// A position supplied up front
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// Coarse position from the public IP address
pub struct IpGeolocator {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

impl IpGeolocator {
    pub fn new() -> Self {
        Self::with_url(IP_LOOKUP_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let data: IpLookupResponse = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        match (data.status.as_str(), data.lat, data.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(GeolocationError::Unavailable(
                data.message.unwrap_or_else(|| "no position in response".into()),
            )),
        }
    }
}

/// Locate the user, then ask the weather provider which place that is
pub async fn resolve_city(
    geolocator: &dyn Geolocator,
    client: &WeatherClient,
    unit: UnitPreference,
) -> Result<String, GeolocationError> {
    let Coordinates { lat, lon } = geolocator.locate().await?;
    debug!(lat, lon, "position resolved");

    let payload = client
        .current_by_coords(lat, lon, unit)
        .await
        .map_err(|e| GeolocationError::Lookup(e.to_string()))?;

    payload
        .name()
        .map(str::to_string)
        .ok_or_else(|| GeolocationError::Lookup("no place name at position".into()))
}
