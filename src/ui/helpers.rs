//! Shared rendering utilities.
//!
//! Width computations count characters, not bytes, so names and titles with
//! `é` or `·` stay aligned.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text` in terminal cells, assuming one cell per char.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Left and right padding that center `text` in `cols` cells.
#[must_use]
pub fn centered_padding(text: &str, cols: usize) -> (usize, usize) {
    let width = text_width(text).min(cols);
    let left = (cols - width) / 2;
    (left, cols - width - left)
}

/// Prints `text` with the character `ranges` highlighted as search matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. Selected rows
/// print plain text so the selection colors stay intact.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_centers_by_characters() {
        assert_eq!(centered_padding(" Pokédex ", 19), (5, 5));
        assert_eq!(centered_padding("abc", 8), (2, 3));
        assert_eq!(centered_padding("too long for it", 4), (0, 0));
    }
}
