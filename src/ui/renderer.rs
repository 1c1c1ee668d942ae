//! Top-level rendering coordinator.
//!
//! Computes the view model for the view on screen and hands it to the
//! matching layout.

use crate::app::{AppState, ViewMode};
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output positioned with cursor escapes. Does not clear
/// the screen; Zellij does that before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    match state.view_mode {
        ViewMode::Listing => {
            let viewmodel = state.compute_viewmodel(rows, cols);
            components::render_listing(&viewmodel, &state.theme, cols, rows);
        }
        ViewMode::Detail => {
            let viewmodel = state.compute_detail_viewmodel(cols);
            components::render_detail(&viewmodel, &state.theme, cols, rows);
        }
    }
}
