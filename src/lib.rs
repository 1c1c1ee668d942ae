//! Dexterm: a Zellij plugin Pokédex.
//!
//! Dexterm fetches the first page of creatures from PokeAPI, resolves every
//! entry's detail with bounded parallelism, and shows them in a filterable
//! table with a detail card per creature:
//! - Case-insensitive name search with match highlighting
//! - Category (type) selection cycling through the types seen in the listing
//! - Detail view with height, weight, abilities and base stat bars
//! - Explicit loading and error states with manual retry

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← web_request, keys
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, action dispatching               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Fetch Layer   │   │ PokeAPI       │
//! │ (ui/)         │   │ (fetch/)      │   │ (pokeapi/)    │
//! │ - Rendering   │   │ - Loaders     │   │ - URLs        │
//! │ - Theming     │   │ - FIFO limit  │   │ - Payloads    │
//! │ - Components  │   │ - Contexts    │   │ - Projection  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and sandbox paths (infrastructure/)│
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The plugin runtime delivers HTTP completions as events, so no layer below
//! `main.rs` performs I/O. Loaders hand out [`fetch::FetchRequest`]s and
//! consume the responses; each request carries a generation token so that
//! completions belonging to a cancelled load are dropped.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/dexterm.wasm" {
//!         base_url "https://pokeapi.co/api/v2"
//!         page_limit "151"
//!         max_in_flight "16"
//!         open_id "pikachu"
//!         theme "dex-night"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use dexterm::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! for action in actions {
//!     if let Action::Fetch(request) = action {
//!         assert!(request.url.ends_with("/pokemon?limit=151"));
//!     }
//! }
//! # Ok::<(), dexterm::DexError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod pokeapi;

pub mod ui;

pub mod observability;

pub use app::{
    handle_event, Action, AppState, Event, InputMode, LoadState, SearchFocus, ViewMode,
};
pub use domain::{DexError, FetchError, Result};
pub use ui::Theme;

use infrastructure::expand_tilde;
use pokeapi::{DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Requests allowed in flight when `max_in_flight` is not configured.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/dexterm.wasm" {
///     base_url "http://localhost:8080/api/v2"
///     page_limit "30"
///     max_in_flight "0"
///     theme_file "~/.config/dexterm/theme.toml"
///     trace_level "dexterm=debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the creature API, without trailing slash.
    pub base_url: String,

    /// Entries requested by the listing page. Default: 151
    pub page_limit: u32,

    /// Detail requests allowed in flight at once; `0` lifts the cap.
    /// Default: 16
    pub max_in_flight: usize,

    /// Id or name whose detail view opens on startup.
    pub open_id: Option<String>,

    /// Built-in theme name: `dex-red` or `dex-night`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            open_id: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, blank or unparsable values fall back to their defaults; bad
    /// values are logged. A `page_limit` of `0` counts as unparsable.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use dexterm::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_limit".to_string(), "20".to_string());
    /// map.insert("open_id".to_string(), "pikachu".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_limit, 20);
    /// assert_eq!(config.open_id.as_deref(), Some("pikachu"));
    /// assert_eq!(config.max_in_flight, 16);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let base_url = text_option(config, "base_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);

        let page_limit = parse_or(config, "page_limit", defaults.page_limit, |n| *n > 0);
        let max_in_flight = parse_or(config, "max_in_flight", defaults.max_in_flight, |_| true);

        Self {
            base_url,
            page_limit,
            max_in_flight,
            open_id: text_option(config, "open_id"),
            theme_name: text_option(config, "theme"),
            theme_file: text_option(config, "theme_file"),
            trace_level: text_option(config, "trace_level"),
        }
    }
}

/// Trimmed value of `key`, or `None` if absent or blank.
fn text_option(config: &BTreeMap<String, String>, key: &str) -> Option<String> {
    config
        .get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Parses `key` as a `T` accepted by `valid`.
fn parse_option<T: FromStr>(
    config: &BTreeMap<String, String>,
    key: &str,
    valid: impl Fn(&T) -> bool,
) -> Result<Option<T>> {
    let Some(raw) = text_option(config, key) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .ok()
        .filter(|value| valid(value))
        .map(Some)
        .ok_or_else(|| DexError::Config(format!("invalid value for {key}: {raw:?}")))
}

fn parse_or<T: FromStr>(
    config: &BTreeMap<String, String>,
    key: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T {
    match parse_option(config, key, valid) {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default");
            default
        }
    }
}

/// Loads the configured theme: `theme_file` first, then `theme`, then the
/// default. Failures are logged and fall through to the default.
fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        match Theme::from_file(expand_tilde(theme_file)) {
            Ok(theme) => return theme,
            Err(e) => {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            }
        }
    } else if let Some(theme_name) = &config.theme_name {
        match Theme::from_name(theme_name) {
            Some(theme) => return theme,
            None => tracing::warn!(theme_name = %theme_name, "unknown theme, using default"),
        }
    }
    Theme::default()
}

/// Creates the application state for `config`.
///
/// Nothing is fetched yet; the listing starts once the host grants web
/// access (see [`Event::PermissionsResult`]).
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, page_limit = config.page_limit, "initializing dexterm plugin");
    AppState::new(config, load_theme(config))
}
