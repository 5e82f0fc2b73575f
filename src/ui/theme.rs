use ratatui::style::Color;

use crate::calendar::category::{FALLBACK_COLOR, parse_hex_color};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub weekday_header: Color,
    pub outside_day: Color,
    pub status_bar: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub command_mode: Color,
    pub error: Color,
    pub success: Color,
}

/// The handful of colors a preset is built from.
struct Palette {
    accent: Color,
    on_accent: Color,
    text: Color,
    muted: Color,
    faint: Color,
    highlight: Color,
    ok: Color,
    alert: Color,
}

impl Theme {
    fn from_palette(name: &str, palette: Palette) -> Self {
        Self {
            name: name.to_string(),
            title: palette.accent,
            selected_bg: palette.accent,
            selected_fg: palette.on_accent,
            today: palette.ok,
            weekday_header: palette.muted,
            outside_day: palette.faint,
            status_bar: palette.text,
            help_title: palette.accent,
            help_section: palette.highlight,
            command_mode: palette.text,
            error: palette.alert,
            success: palette.ok,
        }
    }

    /// Plain ANSI colors, for terminals without true color.
    pub fn default_theme() -> Self {
        Self::from_palette("default", Palette {
            accent: Color::Blue,
            on_accent: Color::White,
            text: Color::White,
            muted: Color::Gray,
            faint: Color::DarkGray,
            highlight: Color::Magenta,
            ok: Color::Green,
            alert: Color::Red,
        })
    }

    /// Near-black surfaces with the "Estudis" blue as accent.
    pub fn midnight() -> Self {
        Self::from_palette("midnight", Palette {
            accent: Color::Rgb(79, 140, 255),
            on_accent: Color::Rgb(10, 10, 10),
            text: Color::Rgb(229, 229, 229),
            muted: Color::Rgb(163, 163, 163),
            faint: Color::Rgb(82, 82, 82),
            highlight: Color::Rgb(249, 115, 22),
            ok: Color::Rgb(74, 222, 128),
            alert: Color::Rgb(248, 113, 113),
        })
    }

    /// For light terminal backgrounds.
    pub fn paper() -> Self {
        Self::from_palette("paper", Palette {
            accent: Color::Rgb(37, 99, 235),
            on_accent: Color::Rgb(250, 250, 250),
            text: Color::Rgb(38, 38, 38),
            muted: Color::Rgb(82, 82, 82),
            faint: Color::Rgb(163, 163, 163),
            highlight: Color::Rgb(194, 65, 12),
            ok: Color::Rgb(21, 128, 61),
            alert: Color::Rgb(185, 28, 28),
        })
    }

    pub fn contrast() -> Self {
        Self::from_palette("contrast", Palette {
            accent: Color::LightYellow,
            on_accent: Color::Black,
            text: Color::White,
            muted: Color::LightCyan,
            faint: Color::Gray,
            highlight: Color::LightMagenta,
            ok: Color::LightGreen,
            alert: Color::LightRed,
        })
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "midnight" => Self::midnight(),
            "paper" => Self::paper(),
            "contrast" => Self::contrast(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "midnight", "paper", "contrast"]
    }

    /// Terminal color for a category's hex color; unparsable values fall
    /// back to white.
    pub fn category_color(hex: &str) -> Color {
        let (r, g, b) = parse_hex_color(hex)
            .or_else(|| parse_hex_color(FALLBACK_COLOR))
            .unwrap_or((255, 255, 255));
        Color::Rgb(r, g, b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
