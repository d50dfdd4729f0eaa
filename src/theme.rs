//! Application-wide theme system
//!
//! A theme is a flat set of named colors; every widget reads from the one
//! active [`AppTheme`] instead of hardcoding colors.

use ratatui::style::Color;
use std::collections::HashMap;

/// Complete application theme defining all UI colors
#[derive(Debug, Clone)]
pub struct AppTheme {
    pub name: String,
    pub description: String,

    // Window colors
    pub window_border: Color,
    pub window_border_focused: Color,
    pub window_background: Color,
    pub window_title: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,
    pub text_selected: Color,

    // Background colors
    pub background_primary: Color,
    pub background_selected: Color,

    // Brand accent (headings, active dot)
    pub accent: Color,

    // Form colors
    pub form_border: Color,
    pub form_label: Color,
    pub form_label_focused: Color,
    pub form_field_text: Color,
    pub form_error: Color,

    // Menu/Popup colors
    pub menu_border: Color,
    pub menu_background: Color,
    pub menu_item_normal: Color,
    pub menu_item_selected: Color,
    pub menu_item_focused: Color,

    // Status/Indicator colors
    pub status_info: Color,
    pub status_success: Color,
    pub status_warning: Color,
    pub status_error: Color,
    pub status_background: Color,

    // Interactive elements
    pub button_normal: Color,
    pub button_active: Color,
    pub button_disabled: Color,
    pub link_color: Color,
}

/// Built-in theme presets
pub struct ThemePresets;

impl ThemePresets {
    /// Get all available built-in themes
    pub fn all() -> HashMap<String, AppTheme> {
        let mut themes = HashMap::new();
        themes.insert("dark".to_string(), Self::dark());
        themes.insert("light".to_string(), Self::light());
        themes.insert("nord".to_string(), Self::nord());
        themes
    }

    /// Sorted theme names, for help text
    pub fn names() -> Vec<String> {
        let mut names: Vec<String> = Self::all().into_keys().collect();
        names.sort();
        names
    }

    pub fn by_name(name: &str) -> Option<AppTheme> {
        Self::all().remove(&name.trim().to_ascii_lowercase())
    }

    /// Default dark theme with gold accents
    pub fn dark() -> AppTheme {
        AppTheme {
            name: "Dark".to_string(),
            description: "Dark theme with gold accents".to_string(),

            // Windows
            window_border: Color::Rgb(120, 120, 120),
            window_border_focused: Color::Rgb(255, 215, 0), // Gold
            window_background: Color::Black,
            window_title: Color::White,

            // Text
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_disabled: Color::DarkGray,
            text_selected: Color::Yellow,

            // Backgrounds
            background_primary: Color::Black,
            background_selected: Color::Rgb(74, 74, 74),

            accent: Color::Rgb(255, 215, 0),

            // Form
            form_border: Color::Cyan,
            form_label: Color::Rgb(100, 149, 237), // Cornflower blue
            form_label_focused: Color::Yellow,
            form_field_text: Color::Cyan,
            form_error: Color::Red,

            // Menu
            menu_border: Color::Cyan,
            menu_background: Color::Black,
            menu_item_normal: Color::White,
            menu_item_selected: Color::Black,
            menu_item_focused: Color::Yellow,

            // Status
            status_info: Color::Cyan,
            status_success: Color::Green,
            status_warning: Color::Yellow,
            status_error: Color::Red,
            status_background: Color::Black,

            // Interactive
            button_normal: Color::Cyan,
            button_active: Color::Green,
            button_disabled: Color::DarkGray,
            link_color: Color::Rgb(71, 122, 179),
        }
    }

    /// Light theme for daytime use
    pub fn light() -> AppTheme {
        AppTheme {
            name: "Light".to_string(),
            description: "Bright light theme for daytime use".to_string(),

            window_border: Color::Rgb(160, 160, 160),
            window_border_focused: Color::Rgb(184, 134, 11), // Dark goldenrod
            window_background: Color::White,
            window_title: Color::Black,

            text_primary: Color::Black,
            text_secondary: Color::Rgb(90, 90, 90),
            text_disabled: Color::Rgb(170, 170, 170),
            text_selected: Color::Rgb(0, 0, 139),

            background_primary: Color::White,
            background_selected: Color::Rgb(220, 220, 220),

            accent: Color::Rgb(184, 134, 11),

            form_border: Color::Blue,
            form_label: Color::Rgb(0, 0, 139),
            form_label_focused: Color::Rgb(184, 134, 11),
            form_field_text: Color::Black,
            form_error: Color::Rgb(178, 34, 34),

            menu_border: Color::Blue,
            menu_background: Color::White,
            menu_item_normal: Color::Black,
            menu_item_selected: Color::White,
            menu_item_focused: Color::Blue,

            status_info: Color::Blue,
            status_success: Color::Rgb(0, 128, 0),
            status_warning: Color::Rgb(184, 134, 11),
            status_error: Color::Rgb(178, 34, 34),
            status_background: Color::Rgb(240, 240, 240),

            button_normal: Color::Blue,
            button_active: Color::Rgb(0, 128, 0),
            button_disabled: Color::Rgb(170, 170, 170),
            link_color: Color::Rgb(0, 102, 204),
        }
    }

    /// Arctic, north-bluish palette
    pub fn nord() -> AppTheme {
        AppTheme {
            name: "Nord".to_string(),
            description: "Arctic, north-bluish color palette".to_string(),

            window_border: Color::Rgb(76, 86, 106),
            window_border_focused: Color::Rgb(136, 192, 208),
            window_background: Color::Rgb(46, 52, 64),
            window_title: Color::Rgb(236, 239, 244),

            text_primary: Color::Rgb(236, 239, 244),
            text_secondary: Color::Rgb(216, 222, 233),
            text_disabled: Color::Rgb(76, 86, 106),
            text_selected: Color::Rgb(235, 203, 139),

            background_primary: Color::Rgb(46, 52, 64),
            background_selected: Color::Rgb(67, 76, 94),

            accent: Color::Rgb(235, 203, 139),

            form_border: Color::Rgb(129, 161, 193),
            form_label: Color::Rgb(129, 161, 193),
            form_label_focused: Color::Rgb(235, 203, 139),
            form_field_text: Color::Rgb(236, 239, 244),
            form_error: Color::Rgb(191, 97, 106),

            menu_border: Color::Rgb(136, 192, 208),
            menu_background: Color::Rgb(59, 66, 82),
            menu_item_normal: Color::Rgb(216, 222, 233),
            menu_item_selected: Color::Rgb(46, 52, 64),
            menu_item_focused: Color::Rgb(235, 203, 139),

            status_info: Color::Rgb(136, 192, 208),
            status_success: Color::Rgb(163, 190, 140),
            status_warning: Color::Rgb(235, 203, 139),
            status_error: Color::Rgb(191, 97, 106),
            status_background: Color::Rgb(59, 66, 82),

            button_normal: Color::Rgb(129, 161, 193),
            button_active: Color::Rgb(163, 190, 140),
            button_disabled: Color::Rgb(76, 86, 106),
            link_color: Color::Rgb(143, 188, 187),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(ThemePresets::by_name("Dark").unwrap().name, "Dark");
        assert_eq!(ThemePresets::by_name(" nord ").unwrap().name, "Nord");
        assert!(ThemePresets::by_name("neon").is_none());
    }

    #[test]
    fn test_names_sorted() {
        assert_eq!(ThemePresets::names(), vec!["dark", "light", "nord"]);
    }
}
