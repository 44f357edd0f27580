pub mod location_header;
pub mod search_overlay;
pub mod weather_body;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use location_header::{LocationHeader, LocationHeaderProps, RAMADAN_BANNER};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use weather_body::{WeatherBody, WeatherBodyProps};
pub use weather_panel::{ERROR_ICON, WeatherPanel, WeatherPanelProps};
