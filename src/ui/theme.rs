//! Theme management and ANSI escape sequence generation.
//!
//! Built-in Catppuccin themes are compiled in; custom themes are TOML files
//! with the same shape. The plugin keeps one theme for dark mode and one for
//! light mode in a [`ThemePair`] and switches between them when the user
//! toggles the theme.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#89b4fa"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! favorite_fg = "#f38ba8"
//! error_fg = "#f38ba8"
//! rating_fg = "#f9e2af"
//! ```

use crate::domain::error::{BookshelfError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in theme used for dark mode unless configured otherwise.
pub const DEFAULT_DARK_THEME: &str = "catppuccin-mocha";

/// Built-in theme used for light mode unless configured otherwise.
pub const DEFAULT_LIGHT_THEME: &str = "catppuccin-latte";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, secondary columns, placeholders.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Heart marker on favorited books.
    pub favorite_fg: String,

    /// Error banner text.
    pub error_fg: String,

    pub rating_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `catppuccin-mocha`, `catppuccin-latte`,
    /// `catppuccin-frappe`, `catppuccin-macchiato`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| BookshelfError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| BookshelfError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses `#rrggbb`; anything malformed renders as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use bookshelf::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_DARK_THEME).expect("Built-in catppuccin-mocha theme should always parse")
    }
}

/// The themes used for dark and light mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePair {
    pub dark: Theme,
    pub light: Theme,
}

impl ThemePair {
    #[must_use]
    pub const fn new(dark: Theme, light: Theme) -> Self {
        Self { dark, light }
    }

    /// The theme for the given mode.
    #[must_use]
    pub const fn select(&self, dark_mode: bool) -> &Theme {
        if dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }
}

impl Default for ThemePair {
    fn default() -> Self {
        let light = Theme::from_name(DEFAULT_LIGHT_THEME).unwrap_or_default();
        Self::new(Theme::default(), light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes_parse() {
        for name in ["catppuccin-mocha", "catppuccin-latte", "catppuccin-frappe", "catppuccin-macchiato"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn test_pair_selects_by_mode() {
        let pair = ThemePair::default();
        assert_eq!(pair.select(true).name, DEFAULT_DARK_THEME);
        assert_eq!(pair.select(false).name, DEFAULT_LIGHT_THEME);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut toml = include_str!("../../themes/catppuccin-latte.toml").to_string();
        toml = toml.replace("name = \"catppuccin-latte\"", "name = \"custom\"");
        std::fs::write(&path, toml).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap().name, "custom");
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Theme::from_file(dir.path().join("missing.toml")),
            Err(BookshelfError::Theme(_))
        ));

        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "name = \"x\"\n[colors]\nheader_fg = 3").unwrap();
        assert!(matches!(Theme::from_file(&path), Err(BookshelfError::Theme(_))));
    }

    #[test]
    fn test_malformed_hex_is_white() {
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("#1e1e2e"), "\u{1b}[48;2;30;30;46m");
    }
}
