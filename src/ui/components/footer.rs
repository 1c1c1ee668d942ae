//! Footer component renderer.

use crate::ui::helpers::{centered_padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the dimmed keybinding hints centered at `row`.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text: String = footer.keybindings.chars().take(cols).collect();
    let (left, right) = centered_padding(&help_text, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(left));
    print!("{help_text}");
    print!("{}", " ".repeat(right));
    print!("{}", Theme::reset());
    row + 1
}
