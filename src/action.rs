//! Actions - intents from the UI and results from async tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: look up a city by name
    WeatherSearch(String),

    /// Intent: repeat the last search
    WeatherRefresh,

    /// Result: response parsed into a report
    WeatherDidLoad(WeatherReport),

    /// Result: search failed (message is user-visible)
    WeatherDidError(String),

    // ===== Geo category =====
    /// Intent: resolve the user's position on start-up
    GeoLocate,

    /// Result: reverse lookup produced a place name
    GeoDidResolve(String),

    /// Result: no position (denied, unavailable or lookup failed)
    GeoDidFail(String),

    // ===== Search category =====
    /// Open city search overlay
    SearchOpen,

    /// Close search overlay (cancel)
    SearchClose,

    /// Search query text changed
    SearchQueryChange(String),

    /// Highlight a recent search (by index)
    SearchSelect(usize),

    // ===== History category =====
    /// Search the city of a recent entry
    HistoryPick(usize),

    /// Result: history file written
    HistoryDidSave,

    /// Result: history file could not be written
    HistoryDidError(String),

    // ===== UI category =====
    /// Switch between metric and imperial
    UiToggleUnits,

    // ===== Error category =====
    /// Hide the current error message
    ErrorDismiss,

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}
