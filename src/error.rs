//! Error types for weather lookups, geolocation and history persistence

/// Why a weather search did not produce a reading.
///
/// The `Display` text is what the panel shows to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Please enter a city name")]
    EmptyQuery,
    #[error("City \"{0}\" not found")]
    NotFound(String),
    #[error("Error: {status} - {reason}")]
    Upstream { status: u16, reason: String },
    #[error("Failed to fetch weather data: {0}")]
    Network(String),
    #[error("Unexpected weather data: {0}")]
    Parse(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("geolocation permission denied")]
    Denied,
    #[error("geolocation unavailable: {0}")]
    Unavailable(String),
    #[error("reverse lookup failed: {0}")]
    Lookup(String),
}

#[derive(thiserror::Error, Debug)]
pub enum HistoryError {
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history file corrupted: {0}")]
    Json(#[from] serde_json::Error),
}
