//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box
//! - [`table`]: Listing table (#, NAME, TYPES)
//! - [`empty`]: Loading, failure and no-match messages
//! - [`detail`]: Detail card with stat bars
//!
//! # Layouts
//!
//! - [`render_listing`]: Header + optional search bar + table or message + footer
//! - [`render_detail`]: Header + card or message + footer

mod detail;
mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailViewModel, FooterInfo, UIViewModel};

use detail::render_detail_card;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Rows between the header border and a centered message.
const EMPTY_STATE_OFFSET: usize = 2;

/// Renders a horizontal border line at `row`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Bottom border and footer on the last two rows.
fn render_bottom(footer: &FooterInfo, theme: &Theme, cols: usize, rows: usize) {
    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, footer, theme, cols);
}

/// Renders the listing layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines, search mode only]
/// [Table Headers]
/// [Table Rows | Empty State]
/// [Border]
/// [Footer]
/// ```
pub fn render_listing(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + EMPTY_STATE_OFFSET, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme);
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    render_bottom(&vm.footer, theme, cols, rows);
}

/// Renders the detail layout.
pub fn render_detail(vm: &DetailViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(card) = &vm.card {
        render_detail_card(current_row + 1, card, theme, cols, rows.saturating_sub(2));
    } else if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + EMPTY_STATE_OFFSET, empty, theme, cols);
    }

    render_bottom(&vm.footer, theme, cols, rows);
}
