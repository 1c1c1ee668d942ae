//! Empty state component renderer.
//!
//! Used for loading, failed and no-match states in both views.

use crate::ui::helpers::{centered_padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

fn render_centered_line(row: usize, text: &str, style: &str, cols: usize) {
    let text: String = text.chars().take(cols).collect();
    let (left, right) = centered_padding(&text, cols);

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(left));
    print!("{text}");
    print!("{}", " ".repeat(right));
    print!("{}", Theme::reset());
}

/// Renders the message, subtitle and optional hint centered from `row`.
///
/// Failed loads use `error_fg` for the message; everything else uses
/// `empty_state_fg`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };

    let message_style = format!("{}{}", Theme::bold(), Theme::fg(color));
    render_centered_line(row, &empty.message, &message_style, cols);

    let dim_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    render_centered_line(row + 1, &empty.subtitle, &dim_style, cols);

    let mut next = row + 2;
    if let Some(hint) = &empty.hint {
        render_centered_line(row + 3, hint, &Theme::fg(&theme.colors.text_normal), cols);
        next = row + 4;
    }
    next
}
