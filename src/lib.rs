//! Bookshelf: a Zellij plugin for browsing books.
//!
//! Bookshelf shows a small featured catalog, searches the Google Books
//! `volumes` API page by page, and keeps a personal list of favorites that
//! survives restarts.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, web_request, worker messaging       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← View/query controller
//! │  - Event handling, paging, favorites                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Gateway       │   │ Worker Layer  │
//! │ (ui/)         │   │ (gateway/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Request URL │   │ - Preferences │
//! │ - Theming     │   │ - Decoding    │   │ - storage/    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) & Infrastructure (infrastructure/)│
//! │  - Book, catalog, favorites, pagination, errors     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Controller state, events and actions
//! - [`domain`]: Books, catalog, favorites, filters, page math, errors
//! - [`gateway`]: Google Books request building and response decoding
//! - [`infrastructure`]: Sandbox paths
//! - [`storage`]: JSON key-value preference store
//! - [`worker`]: Background worker owning the store
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookshelf.wasm" {
//!         dark_theme "catppuccin-mocha"
//!         light_theme "catppuccin-latte"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Library usage
//!
//! ```rust
//! use bookshelf::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! handle_event(&mut state, &Event::StartTyping)?;
//! for c in "dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::FetchPage(_)]));
//! # Ok::<(), bookshelf::BookshelfError>(())
//! ```

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, View};
pub use domain::{Book, BookshelfError, Result};
pub use ui::{Theme, ThemePair};

use gateway::{GoogleBooksGateway, DEFAULT_API_URL};
use std::collections::BTreeMap;
use ui::theme::{DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME};

/// Plugin configuration parsed from the KDL plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search endpoint. Always an http(s) URL; invalid values fall back to
    /// [`DEFAULT_API_URL`].
    pub api_url: String,

    /// Built-in theme for dark mode.
    pub dark_theme: Option<String>,

    /// Built-in theme for light mode.
    pub light_theme: Option<String>,

    /// Custom TOML theme used for both modes. Takes precedence over the
    /// built-in names; `~` is expanded to the sandbox home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            dark_theme: None,
            light_theme: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// Unknown keys are ignored and blank values count as unset.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookshelf::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "ftp://example.com".to_string());
    /// map.insert("dark_theme".to_string(), "catppuccin-frappe".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, bookshelf::gateway::DEFAULT_API_URL);
    /// assert_eq!(config.dark_theme.as_deref(), Some("catppuccin-frappe"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let api_url = value("api_url")
            .and_then(|url| match GoogleBooksGateway::new(&url) {
                Ok(gateway) => Some(gateway.endpoint().to_string()),
                Err(e) => {
                    tracing::warn!(api_url = %url, error = %e, "invalid api_url, using default");
                    None
                }
            })
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url,
            dark_theme: value("dark_theme"),
            light_theme: value("light_theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }

    /// Gateway for the configured endpoint.
    #[must_use]
    pub fn gateway(&self) -> GoogleBooksGateway {
        GoogleBooksGateway::new(&self.api_url).unwrap_or_default()
    }

    /// Resolves the dark and light themes.
    ///
    /// A readable `theme_file` wins for both modes. Otherwise each mode uses
    /// its configured built-in name, falling back to Catppuccin Mocha (dark)
    /// and Latte (light) when the name is unknown.
    #[must_use]
    pub fn themes(&self) -> ThemePair {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return ThemePair::new(theme.clone(), theme),
                Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using built-ins"),
            }
        }

        let builtin = |name: Option<&String>, fallback: &str| {
            let name = name.map_or(fallback, String::as_str);
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using {fallback}");
                Theme::from_name(fallback).unwrap_or_default()
            })
        };

        ThemePair::new(
            builtin(self.dark_theme.as_ref(), DEFAULT_DARK_THEME),
            builtin(self.light_theme.as_ref(), DEFAULT_LIGHT_THEME),
        )
    }
}

/// Builds the startup state: catalog view, page 1, no favorites, light mode.
///
/// Stored favorites and theme arrive later from the worker and are merged by
/// the controller.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing bookshelf plugin");
    AppState::new(config.themes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_defaults_from_empty_map() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn test_custom_api_url_is_kept() {
        let config = Config::from_zellij(&map(&[("api_url", "http://localhost:8080/volumes")]));
        assert_eq!(config.api_url, "http://localhost:8080/volumes");
        assert_eq!(config.gateway().endpoint(), "http://localhost:8080/volumes");
    }

    #[test]
    fn test_invalid_api_url_falls_back() {
        for bad in ["not a url", "file:///etc/passwd", "   "] {
            assert_eq!(Config::from_zellij(&map(&[("api_url", bad)])).api_url, DEFAULT_API_URL);
        }
    }

    #[test]
    fn test_theme_names_resolve() {
        let config = Config::from_zellij(&map(&[("dark_theme", "catppuccin-macchiato"), ("light_theme", "bogus")]));
        let themes = config.themes();

        assert_eq!(themes.dark.name, "catppuccin-macchiato");
        assert_eq!(themes.light.name, DEFAULT_LIGHT_THEME);
    }

    #[test]
    fn test_theme_file_applies_to_both_modes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.toml");
        let toml = include_str!("../themes/catppuccin-latte.toml").replace("catppuccin-latte", "paper");
        std::fs::write(&path, toml).unwrap();

        let config = Config {
            theme_file: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };
        let themes = config.themes();
        assert_eq!(themes.dark.name, "paper");
        assert_eq!(themes.light.name, "paper");
    }

    #[test]
    fn test_missing_theme_file_uses_builtins() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.themes(), ThemePair::default());
    }

    #[test]
    fn test_initialize_starts_on_catalog() {
        let state = initialize(&Config::default());
        assert_eq!(state.view, View::Catalog);
        assert_eq!(state.page, 1);
        assert!(!state.dark_mode);
    }
}
