//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel / compute_detail_viewmodel → view model → render → ANSI
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Header, search bar, table, messages, detail card
//! - [`helpers`]: Cursor positioning, widths, match highlighting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailCard, DetailViewModel, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo,
    StatBar, UIViewModel,
};
