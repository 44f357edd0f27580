//! Effects - side effects declared by the reducer

use crate::state::UnitPreference;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current weather for a city name
    FetchWeather { city: String, unit: UnitPreference },
    /// Resolve the user's position to a place name
    Locate { unit: UnitPreference },
    /// Overwrite the persisted history with these entries
    SaveHistory { entries: Vec<String> },
}
