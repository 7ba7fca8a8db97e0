// Theme support for the TUI
//
// Provides color palettes that can be configured via config file.
// "auto" uses terminal's ANSI palette, named themes use true color (RGB).

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_type: BorderType,
    pub highlight: Color,
    pub selection: Color,
    pub selection_fg: Color,
    pub muted: Color,

    // Semantic colors
    pub title: Color,
    pub status_bar: Color,
    pub error: Color,
    pub success: Color,
    pub author: Color,

    // Panel identity colors (used when focused)
    pub panel_posts: Color,
    pub panel_details: Color,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            _ => Self::auto(), // "auto" or unknown
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            background: Color::Reset,
            foreground: Color::White,
            border: Color::White,
            border_type: BorderType::Plain,
            highlight: Color::Yellow,
            selection: Color::Blue,
            selection_fg: Color::White,
            muted: Color::DarkGray,
            title: Color::Cyan,
            status_bar: Color::Green,
            error: Color::Red,
            success: Color::Green,
            author: Color::Cyan,
            panel_posts: Color::Cyan,
            panel_details: Color::Magenta,
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            background: Color::Rgb(0x28, 0x2a, 0x36),
            foreground: Color::Rgb(0xf8, 0xf8, 0xf2),
            border: Color::Rgb(0x62, 0x72, 0xa4),
            border_type: BorderType::Rounded,
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c),
            selection: Color::Rgb(0x44, 0x47, 0x5a),
            selection_fg: Color::Rgb(0xf8, 0xf8, 0xf2),
            muted: Color::Rgb(0x62, 0x72, 0xa4),
            title: Color::Rgb(0x8b, 0xe9, 0xfd),
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b),
            error: Color::Rgb(0xff, 0x55, 0x55),
            success: Color::Rgb(0x50, 0xfa, 0x7b),
            author: Color::Rgb(0x8b, 0xe9, 0xfd),
            panel_posts: Color::Rgb(0x8b, 0xe9, 0xfd),
            panel_details: Color::Rgb(0xff, 0x79, 0xc6),
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            background: Color::Rgb(0x2e, 0x34, 0x40),
            foreground: Color::Rgb(0xd8, 0xde, 0xe9),
            border: Color::Rgb(0x4c, 0x56, 0x6a),
            border_type: BorderType::Rounded,
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),
            selection: Color::Rgb(0x43, 0x4c, 0x5e),
            selection_fg: Color::Rgb(0xec, 0xef, 0xf4),
            muted: Color::Rgb(0x4c, 0x56, 0x6a),
            title: Color::Rgb(0x88, 0xc0, 0xd0),
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),
            error: Color::Rgb(0xbf, 0x61, 0x6a),
            success: Color::Rgb(0xa3, 0xbe, 0x8c),
            author: Color::Rgb(0x88, 0xc0, 0xd0),
            panel_posts: Color::Rgb(0x88, 0xc0, 0xd0),
            panel_details: Color::Rgb(0xb4, 0x8e, 0xad),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_falls_back_to_auto() {
        assert_eq!(Theme::by_name("Dracula").name, "dracula");
        assert_eq!(Theme::by_name("unknown-theme").name, "auto");
    }
}
