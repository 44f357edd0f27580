//! Weather TUI - current conditions from OpenWeatherMap
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod calendar;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod geolocation;
pub mod history;
pub mod icons;
pub mod reducer;
pub mod state;
