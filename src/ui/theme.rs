//! Theme management and ANSI escape sequence generation.
//!
//! Two color schemes are built in and custom ones can be loaded from TOML.
//! Colors are hex strings converted to 24-bit ANSI sequences at render time.
//!
//! # Built-in Themes
//!
//! - `dex-red`: red header band on a dark background (default)
//! - `dex-night`: muted dark palette
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#fdf6e3"
//! header_bg = "#c0392b"        # optional
//! selection_fg = "#1c1c1c"
//! selection_bg = "#f5c542"
//! text_normal = "#e8e8e8"
//! text_dim = "#8a8a8a"
//! border = "#7f1d1d"
//! search_bar_border = "#e74c3c"
//! match_highlight_fg = "#1c1c1c"
//! match_highlight_bg = "#f39c12"
//! empty_state_fg = "#5dade2"
//! error_fg = "#ff5f56"
//! category_fg = "#a3be8c"
//! stat_bar_fg = "#e74c3c"
//! ```

use crate::domain::{DexError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "dex-red";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, subtitles and other secondary text.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Loading and no-match messages.
    pub empty_state_fg: String,
    /// Failed-load messages.
    pub error_fg: String,

    /// TYPES column and detail type line.
    pub category_fg: String,
    /// Base stat bars.
    pub stat_bar_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "dex-red" => include_str!("../../themes/dex-red.toml"),
            "dex-night" => include_str!("../../themes/dex-night.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DexError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| DexError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; anything else renders white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground color sequence (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color sequence (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Bold text.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Faint text.
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
    /// Returns the `dex-red` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in dex-red theme should always parse")
    }
}
