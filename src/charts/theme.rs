//! Chart themes
//!
//! A theme only changes the visual template (backgrounds, text and grid
//! colours). City colours come from the palette and never change with
//! the theme.

use serde::{Deserialize, Serialize};

/// Visual template selected in the UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Concrete layout colours for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
    pub font_color: &'static str,
    pub grid_color: &'static str,
}

impl Theme {
    /// All themes, in the order the UI offers them
    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark]
    }

    /// Parse a theme name; unknown names yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" | "plotly_white" => Some(Theme::Light),
            "dark" | "plotly_dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Layout colours, matching Plotly's `plotly_white` / `plotly_dark`
    pub fn style(&self) -> ThemeStyle {
        match self {
            Theme::Light => ThemeStyle {
                paper_bgcolor: "#ffffff",
                plot_bgcolor: "#ffffff",
                font_color: "#2a3f5f",
                grid_color: "#ebf0f8",
            },
            Theme::Dark => ThemeStyle {
                paper_bgcolor: "rgb(17,17,17)",
                plot_bgcolor: "rgb(17,17,17)",
                font_color: "#f2f5fa",
                grid_color: "#283442",
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse(" DARK "), Some(Theme::Dark));
        assert_eq!(Theme::parse("plotly_dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn test_styles_differ() {
        assert_ne!(Theme::Light.style(), Theme::Dark.style());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }
}
