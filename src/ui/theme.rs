use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Color palette for a theme - defines all semantic colors used by the page
#[derive(Debug, Clone)]
pub struct ThemePalette {
    // Primary UI colors
    pub primary: Color,
    pub accent: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_dim: Color,

    // Cards
    pub card_border: Color,
    pub card_installed: Color,
    pub card_text: Color,

    // UI element colors
    pub border_focused: Color,
    pub link: Color,
    pub scrollbar: Color,
    pub background: Color,
    pub help_section: Color,
}

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Default,
    Nord,
    Dracula,
    Dark,
    White,
}

impl Theme {
    /// Get the color palette for this theme
    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Default => ThemePalette {
                primary: Color::Cyan,
                accent: Color::Yellow,

                text_primary: Color::White,
                text_secondary: Color::Gray,
                text_dim: Color::DarkGray,

                card_border: Color::Gray,
                card_installed: Color::Green,
                card_text: Color::White,

                border_focused: Color::Cyan,
                link: Color::Cyan,
                scrollbar: Color::DarkGray,
                background: Color::Black,
                help_section: Color::Yellow,
            },

            Theme::Nord => ThemePalette {
                // Nord color palette (https://www.nordtheme.com/)
                primary: Color::Rgb(136, 192, 208),   // Nord Frost - #88C0D0
                accent: Color::Rgb(235, 203, 139),    // Nord Aurora Yellow - #EBCB8B

                text_primary: Color::Rgb(236, 239, 244),   // Nord Snow Storm - #ECEFF4
                text_secondary: Color::Rgb(216, 222, 233), // Nord Snow Storm - #D8DEE9
                text_dim: Color::Rgb(76, 86, 106),         // Nord Polar Night - #4C566A

                card_border: Color::Rgb(76, 86, 106),
                card_installed: Color::Rgb(163, 190, 140),
                card_text: Color::Rgb(229, 233, 240),

                border_focused: Color::Rgb(136, 192, 208),
                link: Color::Rgb(129, 161, 193),        // Nord Frost Blue - #81A1C1
                scrollbar: Color::Rgb(67, 76, 94),
                background: Color::Rgb(46, 52, 64),     // Nord Polar Night - #2E3440
                help_section: Color::Rgb(235, 203, 139),
            },

            Theme::Dracula => ThemePalette {
                // Dracula color palette (https://draculatheme.com/)
                primary: Color::Rgb(189, 147, 249),   // Purple - #BD93F9
                accent: Color::Rgb(241, 250, 140),    // Yellow - #F1FA8C

                text_primary: Color::Rgb(248, 248, 242),  // Foreground - #F8F8F2
                text_secondary: Color::Rgb(98, 114, 164), // Comment - #6272A4
                text_dim: Color::Rgb(68, 71, 90),         // Current Line - #44475A

                card_border: Color::Rgb(98, 114, 164),
                card_installed: Color::Rgb(80, 250, 123),
                card_text: Color::Rgb(248, 248, 242),

                border_focused: Color::Rgb(189, 147, 249),
                link: Color::Rgb(139, 233, 253),        // Cyan - #8BE9FD
                scrollbar: Color::Rgb(68, 71, 90),
                background: Color::Rgb(40, 42, 54),     // Background - #282A36
                help_section: Color::Rgb(241, 250, 140),
            },

            Theme::Dark => ThemePalette {
                // Material-inspired dark theme
                primary: Color::Rgb(100, 149, 237),   // Cornflower Blue
                accent: Color::Rgb(255, 200, 87),     // Amber

                text_primary: Color::Rgb(224, 224, 224),
                text_secondary: Color::Rgb(158, 158, 158),
                text_dim: Color::Rgb(97, 97, 97),

                card_border: Color::Rgb(66, 66, 66),
                card_installed: Color::Rgb(76, 175, 80),
                card_text: Color::Rgb(224, 224, 224),

                border_focused: Color::Rgb(100, 149, 237),
                link: Color::Rgb(33, 150, 243),         // Material Blue
                scrollbar: Color::Rgb(66, 66, 66),
                background: Color::Rgb(18, 18, 18),
                help_section: Color::Rgb(255, 200, 87),
            },

            Theme::White => ThemePalette {
                // Light theme with high contrast
                primary: Color::Rgb(25, 118, 210),    // Blue
                accent: Color::Rgb(255, 143, 0),      // Orange

                text_primary: Color::Rgb(33, 33, 33),
                text_secondary: Color::Rgb(97, 97, 97),
                text_dim: Color::Rgb(158, 158, 158),

                card_border: Color::Rgb(189, 189, 189),
                card_installed: Color::Rgb(56, 142, 60),
                card_text: Color::Rgb(33, 33, 33),

                border_focused: Color::Rgb(25, 118, 210),
                link: Color::Rgb(2, 136, 209),
                scrollbar: Color::Rgb(189, 189, 189),
                background: Color::Rgb(245, 245, 245),  // Off-White
                help_section: Color::Rgb(255, 143, 0),
            },
        }
    }

    /// Get the display name of this theme
    pub fn name(&self) -> &str {
        match self {
            Theme::Default => "Default",
            Theme::Nord => "Nord",
            Theme::Dracula => "Dracula",
            Theme::Dark => "Dark",
            Theme::White => "White (Light)",
        }
    }

    /// Get all available themes
    pub fn all() -> Vec<Theme> {
        vec![
            Theme::Default,
            Theme::Nord,
            Theme::Dracula,
            Theme::Dark,
            Theme::White,
        ]
    }

    /// Look a theme up by name, ignoring case. "white" and "light" both
    /// select the light theme.
    pub fn from_name(name: &str) -> Option<Theme> {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "light" => Some(Theme::White),
            _ => Self::all().into_iter().find(|theme| {
                let display = theme.name().to_lowercase();
                display == name || display.split_whitespace().next() == Some(name.as_str())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_resolve_by_name() {
        assert_eq!(Theme::from_name("nord"), Some(Theme::Nord));
        assert_eq!(Theme::from_name(" Dracula "), Some(Theme::Dracula));
        assert_eq!(Theme::from_name("light"), Some(Theme::White));
        assert_eq!(Theme::from_name("white"), Some(Theme::White));
        assert_eq!(Theme::from_name("solarized"), None);
    }

    #[test]
    fn theme_serializes_by_variant_name() {
        let json = serde_json::to_string(&Theme::Nord).unwrap();
        assert_eq!(json, "\"Nord\"");
        let theme: Theme = serde_json::from_str("\"Dark\"").unwrap();
        assert_eq!(theme, Theme::Dark);
    }
}
