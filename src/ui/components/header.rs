//! Title bar.

use crate::ui::helpers::{centered_padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the bold, centered title at `row` and returns the next row.
///
/// The padding is printed inside the styled span so `header_bg`, when the
/// theme sets one, fills the whole line.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let (left, right) = centered_padding(&header.title, cols);
    let background = theme
        .colors
        .header_bg
        .as_deref()
        .map(Theme::bg)
        .unwrap_or_default();

    position_cursor(row, 1);
    print!(
        "{}{}{background}{}{}{}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        " ".repeat(left),
        header.title,
        " ".repeat(right),
        Theme::reset()
    );
    row + 1
}
