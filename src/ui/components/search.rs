//! Name search input box.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Spaces left and right of the box.
const MARGIN: usize = 5;
const PROMPT: &str = " Name: ";
/// Shown after the query as a cursor.
const CURSOR: char = '▏';

/// Renders the three-line search box at `row` and returns the row after it.
///
/// Queries longer than the box keep their tail visible, since that is where
/// typing happens.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(MARGIN * 2 + 2);
    let border = Theme::fg(&theme.colors.search_bar_border);
    let margin = " ".repeat(MARGIN);

    let room = inner.saturating_sub(text_width(PROMPT) + 1);
    let skip = text_width(&search.query).saturating_sub(room);
    let query: String = search.query.chars().skip(skip).collect();
    let used = text_width(PROMPT) + text_width(&query) + 1;

    position_cursor(row, 1);
    print!("{margin}{border}┌{}┐{}", "─".repeat(inner), Theme::reset());

    position_cursor(row + 1, 1);
    print!(
        "{margin}{border}│{}{PROMPT}{}{query}{CURSOR}{}{border}│{}",
        Theme::fg(&theme.colors.text_dim),
        Theme::fg(&theme.colors.text_normal),
        " ".repeat(inner.saturating_sub(used)),
        Theme::reset()
    );

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{}┘{}", "─".repeat(inner), Theme::reset());

    row + 3
}
