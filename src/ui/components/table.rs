//! Table component renderer.
//!
//! Three columns: dex number, NAME with search highlights, and TYPES.

use crate::app::state::{NAME_COLUMN_WIDTH, NUMBER_COLUMN_WIDTH};
use crate::ui::helpers::{self, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the bold `#  NAME  TYPES` column headers at `row`.
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<num$}{:<name$}{}",
        "#",
        "NAME",
        "TYPES",
        num = NUMBER_COLUMN_WIDTH,
        name = NAME_COLUMN_WIDTH
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the visible listing rows, one terminal line each.
///
/// # Parameters
///
/// * `row` - Terminal row of the first item (1-based)
/// * `items` - Windowed rows from the view model, in display order
/// * `theme` - Colors for selection, highlights and the TYPES column
/// * `cols` - Pane width; every row is padded to it
///
/// # Returns
///
/// The row below the last rendered item.
pub fn render_table_rows(
    row: usize,
    items: &[DisplayItem],
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one row, padded to `cols` so the selection background spans it.
///
/// Selection colors take precedence over match highlights and the category
/// color.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    print!("{:<width$}", item.number, width = NUMBER_COLUMN_WIDTH);

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    let name_width = text_width(&item.name);
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(name_width)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.category_fg));
    }
    print!("{}", item.types);

    let line_len = NUMBER_COLUMN_WIDTH.max(text_width(&item.number))
        + NAME_COLUMN_WIDTH.max(name_width)
        + text_width(&item.types);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
