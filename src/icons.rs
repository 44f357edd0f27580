//! Condition icons with multi-color layer compositing
//!
//! OpenWeatherMap icon codes map onto a closed set of local icons. Each icon
//! is drawn from one or more single-color layers; spaces are transparent, so
//! later layers paint over earlier ones.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Height of every sprite, in rows.
pub const SPRITE_HEIGHT: u16 = 5;

// ============================================================================
// Sprite data
// Every layer is SPRITE_HEIGHT rows of 13 columns.
// ============================================================================

mod sprite_data {
    pub const SUN: &str = concat!(
        "    \\   /    \n",
        "     .-.     \n",
        "  - (   ) -  \n",
        "     `-'     \n",
        "    /   \\    \n",
    );
    pub const MOON: &str = concat!(
        "     _..     \n",
        "   .' .-'    \n",
        "  /  /       \n",
        "  \\  '-.     \n",
        "   '-..-'    \n",
    );
    // Peeking out behind a small cloud
    pub const SUN_CORNER: &str = concat!(
        "  \\  /       \n",
        "_ /\"\"        \n",
        "  \\_         \n",
        "  /          \n",
        "             \n",
    );
    pub const MOON_CORNER: &str = concat!(
        "  _.         \n",
        " ( (         \n",
        "  '-         \n",
        "             \n",
        "             \n",
    );
    pub const CLOUD_SMALL: &str = concat!(
        "             \n",
        "     .-.     \n",
        "    (   ).   \n",
        "   (___(__)  \n",
        "             \n",
    );
    pub const CLOUD: &str = concat!(
        "     .--.    \n",
        "  .-(    ).  \n",
        " (___.__)__) \n",
        "             \n",
        "             \n",
    );
    pub const DRIZZLE: &str = concat!(
        "             \n",
        "             \n",
        "             \n",
        "   '  '  '   \n",
        "  '  '  '    \n",
    );
    pub const RAIN: &str = concat!(
        "             \n",
        "             \n",
        "             \n",
        "  / / / / /  \n",
        " / / / / /   \n",
    );
    pub const SNOW: &str = concat!(
        "             \n",
        "             \n",
        "             \n",
        "  *  *  *  * \n",
        "   *  *  *   \n",
    );
    pub const BOLT: &str = concat!(
        "             \n",
        "             \n",
        "             \n",
        "    _/ _/    \n",
        "    /  /     \n",
    );
    pub const MIST: &str = concat!(
        "             \n",
        " _ - _ - _ - \n",
        "  _ - _ - _  \n",
        " _ - _ - _ - \n",
        "             \n",
    );
}

// ============================================================================
// Layer compositing
// ============================================================================

/// A single sprite layer with its content and color
struct SpriteLayer {
    content: &'static str,
    color: Color,
}

/// Composite multiple layers into Text, treating spaces as transparent
fn composite_layers(layers: &[SpriteLayer]) -> Text<'static> {
    if layers.is_empty() {
        return Text::default();
    }

    let layer_lines: Vec<Vec<Vec<char>>> = layers
        .iter()
        .map(|l| l.content.lines().map(|line| line.chars().collect()).collect())
        .collect();

    let max_lines = layer_lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let max_width = layer_lines
        .iter()
        .flat_map(|lines| lines.iter())
        .map(|line| line.len())
        .max()
        .unwrap_or(0);

    let mut result_lines = Vec::with_capacity(max_lines);

    for line_idx in 0..max_lines {
        let mut spans = Vec::with_capacity(max_width);

        for col_idx in 0..max_width {
            // Last layer is the foreground
            let mut found_char = ' ';
            let mut found_color = Color::Reset;

            for (layer_idx, layer) in layers.iter().enumerate().rev() {
                let ch = layer_lines[layer_idx]
                    .get(line_idx)
                    .and_then(|line| line.get(col_idx))
                    .copied()
                    .unwrap_or(' ');
                if ch != ' ' {
                    found_char = ch;
                    found_color = layer.color;
                    break;
                }
            }

            spans.push(Span::styled(
                found_char.to_string(),
                Style::default().fg(found_color),
            ));
        }

        result_lines.push(Line::from(spans));
    }

    Text::from(result_lines)
}

// ============================================================================
// Types
// ============================================================================

/// The local icon set. `Clear` doubles as the fallback for unknown codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum WeatherIcon {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Night,
    CloudyNight,
    RainNight,
    ThunderNight,
}

impl WeatherIcon {
    /// Map an OpenWeatherMap icon code (e.g. `"10n"`) to a local icon
    pub fn from_code(code: &str) -> Self {
        match code {
            "01d" => WeatherIcon::Clear,
            "02d" => WeatherIcon::Cloud,
            "03d" | "04d" | "03n" | "04n" => WeatherIcon::Drizzle,
            "09d" | "10d" => WeatherIcon::Rain,
            "11d" => WeatherIcon::Thunderstorm,
            "13d" | "13n" => WeatherIcon::Snow,
            "50d" | "50n" => WeatherIcon::Mist,
            "01n" => WeatherIcon::Night,
            "02n" => WeatherIcon::CloudyNight,
            "09n" | "10n" => WeatherIcon::RainNight,
            "11n" => WeatherIcon::ThunderNight,
            _ => WeatherIcon::Clear,
        }
    }

    /// Name of the asset this icon stands for
    pub fn asset_name(self) -> &'static str {
        match self {
            WeatherIcon::Clear => "clear",
            WeatherIcon::Cloud => "cloud",
            WeatherIcon::Drizzle => "drizzle",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Thunderstorm => "thunder",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Mist => "mist",
            WeatherIcon::Night => "night",
            WeatherIcon::CloudyNight => "cloudy-night",
            WeatherIcon::RainNight => "rain-night",
            WeatherIcon::ThunderNight => "thunder-night",
        }
    }

    /// Emoji representation for when sprites don't fit
    pub fn emoji(self) -> &'static str {
        match self {
            WeatherIcon::Clear => "\u{2600}\u{fe0f}",
            WeatherIcon::Cloud => "\u{26c5}",
            WeatherIcon::Drizzle => "\u{1f326}\u{fe0f}",
            WeatherIcon::Rain | WeatherIcon::RainNight => "\u{1f327}\u{fe0f}",
            WeatherIcon::Thunderstorm | WeatherIcon::ThunderNight => "\u{26c8}\u{fe0f}",
            WeatherIcon::Snow => "\u{2744}\u{fe0f}",
            WeatherIcon::Mist => "\u{1f32b}\u{fe0f}",
            WeatherIcon::Night => "\u{1f319}",
            WeatherIcon::CloudyNight => "\u{2601}\u{fe0f}",
        }
    }

    /// Layered sprite art for this icon
    pub fn sprite(self) -> Text<'static> {
        use sprite_data::*;

        let sun = |content| SpriteLayer {
            content,
            color: Color::Yellow,
        };
        let moon = |content| SpriteLayer {
            content,
            color: Color::Rgb(220, 220, 170),
        };
        let cloud = |content| SpriteLayer {
            content,
            color: Color::Rgb(160, 160, 175),
        };

        let layers = match self {
            WeatherIcon::Clear => vec![sun(SUN)],
            WeatherIcon::Night => vec![moon(MOON)],
            WeatherIcon::Cloud => vec![sun(SUN_CORNER), cloud(CLOUD_SMALL)],
            WeatherIcon::CloudyNight => vec![moon(MOON_CORNER), cloud(CLOUD_SMALL)],
            WeatherIcon::Drizzle => vec![
                cloud(CLOUD),
                SpriteLayer {
                    content: DRIZZLE,
                    color: Color::Rgb(130, 170, 200),
                },
            ],
            WeatherIcon::Rain => vec![
                cloud(CLOUD),
                SpriteLayer {
                    content: RAIN,
                    color: Color::Rgb(80, 140, 200),
                },
            ],
            WeatherIcon::RainNight => vec![
                moon(MOON_CORNER),
                cloud(CLOUD),
                SpriteLayer {
                    content: RAIN,
                    color: Color::Rgb(80, 140, 200),
                },
            ],
            WeatherIcon::Thunderstorm => vec![cloud(CLOUD), sun(BOLT)],
            WeatherIcon::ThunderNight => vec![moon(MOON_CORNER), cloud(CLOUD), sun(BOLT)],
            WeatherIcon::Snow => vec![
                cloud(CLOUD),
                SpriteLayer {
                    content: SNOW,
                    color: Color::Rgb(200, 220, 255),
                },
            ],
            WeatherIcon::Mist => vec![SpriteLayer {
                content: MIST,
                color: Color::Rgb(180, 180, 190),
            }],
        };

        composite_layers(&layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [WeatherIcon; 11] = [
        WeatherIcon::Clear,
        WeatherIcon::Cloud,
        WeatherIcon::Drizzle,
        WeatherIcon::Rain,
        WeatherIcon::Thunderstorm,
        WeatherIcon::Snow,
        WeatherIcon::Mist,
        WeatherIcon::Night,
        WeatherIcon::CloudyNight,
        WeatherIcon::RainNight,
        WeatherIcon::ThunderNight,
    ];

    #[test]
    fn test_day_codes() {
        assert_eq!(WeatherIcon::from_code("01d"), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::from_code("02d"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::from_code("03d"), WeatherIcon::Drizzle);
        assert_eq!(WeatherIcon::from_code("04d"), WeatherIcon::Drizzle);
        assert_eq!(WeatherIcon::from_code("09d"), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::from_code("10d"), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::from_code("11d"), WeatherIcon::Thunderstorm);
        assert_eq!(WeatherIcon::from_code("13d"), WeatherIcon::Snow);
        assert_eq!(WeatherIcon::from_code("50d"), WeatherIcon::Mist);
    }

    #[test]
    fn test_night_codes() {
        assert_eq!(WeatherIcon::from_code("01n"), WeatherIcon::Night);
        assert_eq!(WeatherIcon::from_code("02n"), WeatherIcon::CloudyNight);
        assert_eq!(WeatherIcon::from_code("04n"), WeatherIcon::Drizzle);
        assert_eq!(WeatherIcon::from_code("10n"), WeatherIcon::RainNight);
        assert_eq!(WeatherIcon::from_code("11n"), WeatherIcon::ThunderNight);
        assert_eq!(WeatherIcon::from_code("13n"), WeatherIcon::Snow);
        assert_eq!(WeatherIcon::from_code("50n"), WeatherIcon::Mist);
    }

    #[test]
    fn test_unmapped_code_falls_back_to_clear() {
        assert_eq!(WeatherIcon::from_code(""), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::from_code("99x"), WeatherIcon::Clear);
    }

    #[test]
    fn test_all_sprites_have_full_height() {
        for icon in ALL {
            let text = icon.sprite();
            assert_eq!(
                text.lines.len(),
                SPRITE_HEIGHT as usize,
                "Sprite {:?} has wrong height",
                icon
            );
            assert!(!icon.emoji().is_empty());
        }
    }

    #[test]
    fn test_foreground_layer_wins() {
        // Bolt is drawn over the cloud, so its glyphs survive compositing
        let text = WeatherIcon::Thunderstorm.sprite();
        let row: String = text.lines[3].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(row.contains("_/"));
    }
}
